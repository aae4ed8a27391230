//! Core engine implementation
//!
//! Owns the world and runs one tick in a fixed order:
//!
//! 1. resolve the active camera and the (optionally clamped) delta time
//! 2. apply viewport, look and zoom input to the camera
//! 3. driver systems: world-space, tank, no-clip, patrol
//! 4. collision response, then movement
//! 5. refresh the active camera
//! 6. object culling, then light culling
//! 7. assemble the [`FrameOutput`] for the renderer

use crate::config::{ConfigError, EngineConfig};
use crate::ecs::system::{FrameContext, System};
use crate::ecs::systems::{
    CollisionSystem, LightCullingSystem, MovementSystem, NoClipInputSystem, PatrolSystem,
    TankInputSystem, VisibilitySystem, WorldSpaceInputSystem,
};
use crate::ecs::{CameraError, Entity, World};
use crate::foundation::math::Vec2;
use crate::foundation::time::Timer;
use crate::input::{InputIntent, InputSource};
use crate::render::frame::{DrawItem, FrameOutput, FrameRenderer, PackedPointLight, RenderError};
use crate::scene::{SceneDescription, SceneError, SceneLoader};
use std::time::Duration;
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates the simulation systems and the per-frame hand-off
/// to a renderer.
pub struct Engine {
    world: World,
    config: EngineConfig,
    timer: Timer,
    systems: Vec<Box<dyn System>>,
    visibility: VisibilitySystem,
    lights: LightCullingSystem,
    draws: Vec<DrawItem>,
}

impl Engine {
    /// Create a new engine instance with an empty world
    ///
    /// # Errors
    /// [`EngineError::Config`] if the configuration fails validation.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let systems: Vec<Box<dyn System>> = vec![
            Box::new(WorldSpaceInputSystem),
            Box::new(TankInputSystem),
            Box::new(NoClipInputSystem),
            Box::new(PatrolSystem),
            Box::new(CollisionSystem),
            Box::new(MovementSystem),
        ];
        log::debug!(
            "Simulation order: {:?}",
            systems.iter().map(|system| system.name()).collect::<Vec<_>>()
        );

        Ok(Self {
            world: World::new(),
            timer: Timer::new().with_max_delta(config.max_delta_time),
            visibility: VisibilitySystem::new(config.frustum_culling, config.log_visibility_changes),
            lights: LightCullingSystem::new(config.frustum_culling),
            systems,
            draws: Vec::new(),
            config,
        })
    }

    /// Replace the world's contents with a scene
    ///
    /// Cameras get the configured viewport's aspect ratio. On error the
    /// world is left empty.
    ///
    /// # Errors
    /// [`EngineError::Scene`] for any loader failure.
    pub fn load_scene(&mut self, description: &SceneDescription) -> Result<Vec<Entity>, EngineError> {
        self.world.clear();
        let spawned = SceneLoader::populate(&mut self.world, description).inspect_err(|_| self.world.clear())?;
        self.apply_viewport(self.config.viewport_width, self.config.viewport_height);
        Ok(spawned)
    }

    fn apply_viewport(&mut self, width: u32, height: u32) {
        for (_, camera) in self.world.cameras.iter_mut() {
            camera.set_viewport(width, height);
        }
    }

    /// Advance the simulation by `elapsed` seconds and cull
    ///
    /// `elapsed` is clamped to `max_delta_time` when configured.
    ///
    /// # Errors
    /// [`EngineError::Camera`] unless exactly one entity has a camera. The
    /// world is untouched in that case.
    pub fn tick(&mut self, elapsed: f32, intent: &InputIntent) -> Result<FrameOutput<'_>, EngineError> {
        let active_camera = self.world.active_camera()?;
        let delta_time = self.timer.advance(elapsed);

        if let Some((width, height)) = intent.viewport {
            log::debug!("Viewport resized to {}x{}", width, height);
            self.apply_viewport(width, height);
        }
        let camera = self.world.cameras.get_mut(active_camera);
        if intent.look != Vec2::zeros() {
            camera.process_mouse_movement(intent.look.x, intent.look.y, true);
        }
        if intent.zoom != 0.0 {
            camera.process_mouse_scroll(intent.zoom);
        }

        let frame = FrameContext {
            delta_time,
            intent: *intent,
            active_camera,
        };
        for system in &mut self.systems {
            system.run(&mut self.world, &frame);
        }

        let camera = self.world.cameras.get_mut(active_camera);
        camera.refresh();
        let frustum = *camera.frustum();

        self.visibility.cull(&self.world, &frustum);
        self.lights.cull(&self.world, &frustum);

        self.draws.clear();
        for &entity in self.visibility.visible() {
            self.draws.push(DrawItem {
                entity,
                mesh: self.world.meshes.get(entity).handle,
                material: self.world.materials.get(entity).handle,
                model_matrix: self.world.transforms.get(entity).to_matrix(),
                instance_count: self.world.instanced.try_get(entity).map_or(1, |instanced| instanced.count),
                skybox: self.world.skyboxes.has(entity),
            });
        }

        log::trace!(
            "Frame {}: {} draws, {} lights",
            self.timer.frame_count(),
            self.draws.len(),
            self.lights.visible().len()
        );

        let camera = self.world.cameras.get(active_camera);
        Ok(FrameOutput {
            draws: &self.draws,
            lights: self.lights.visible(),
            view: *camera.view_matrix(),
            projection: *camera.projection_matrix(),
            camera_position: camera.position(),
        })
    }

    /// Run the main loop until the input source asks to stop
    ///
    /// Frames are paced to `target_fps` when configured.
    ///
    /// # Errors
    /// The first tick or renderer error ends the loop and is returned.
    pub fn run<S, R>(&mut self, input: &mut S, renderer: &mut R) -> Result<(), EngineError>
    where
        S: InputSource + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        log::info!("Starting main loop...");

        #[allow(clippy::cast_precision_loss)]
        let frame_budget = self
            .config
            .target_fps
            .map(|fps| Duration::from_secs_f32(1.0 / fps as f32));

        self.timer.sample();
        while !input.shutdown_requested() {
            let intent = input.poll();
            let elapsed = self.timer.sample();
            let frame = self.tick(elapsed, &intent)?;
            renderer.submit(&frame)?;

            if let Some(budget) = frame_budget {
                let spent = Duration::from_secs_f32(self.timer.since_last_sample());
                if let Some(remaining) = budget.checked_sub(spent) {
                    std::thread::sleep(remaining);
                }
            }
        }

        log::info!(
            "Engine shutdown complete: {} frames, {:.1} average FPS",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        Ok(())
    }

    /// Get the ECS world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the ECS world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frame timing
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Entities visible in the most recent tick
    pub fn visible_entities(&self) -> &[Entity] {
        self.visibility.visible()
    }

    /// Point lights visible in the most recent tick
    pub fn visible_lights(&self) -> &[PackedPointLight] {
        self.lights.visible()
    }
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// The world does not have exactly one camera
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene loading error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Renderer error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
