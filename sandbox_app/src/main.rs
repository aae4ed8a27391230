//! Sandbox demo application
//!
//! Loads a scene, then drives the engine headlessly with scripted input and
//! a renderer that only validates and logs what it receives.
//!
//! Usage: `sandbox [scene.ron] [--config engine.toml] [--frames N]`, see
//! `sandbox --help`.

mod logging_renderer;
mod scripted_input;

use clap::Parser;
use logging_renderer::LoggingRenderer;
use scripted_input::ScriptedInput;
use sparse_engine::config::{Config, ConfigError};
use sparse_engine::foundation::logging;
use sparse_engine::prelude::*;
use sparse_engine::scene::ComponentTemplate;
use std::path::PathBuf;
use thiserror::Error;

const BUILTIN_SCENE: &str = include_str!("../scenes/arena.ron");
const DEFAULT_FRAMES: u32 = 600;

#[derive(Debug, Error)]
enum SandboxError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Scene(#[from] SceneError),

    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Headless sandbox for sparse_engine scenes
#[derive(Debug, Parser)]
#[command(name = "sandbox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run a scene headlessly with scripted input", long_about = None)]
struct Args {
    /// RON scene file (defaults to the built-in arena)
    scene: Option<PathBuf>,

    /// Engine configuration file (TOML or RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u32,
}

fn resources(scene: &SceneDescription) -> (Vec<MeshHandle>, Vec<MaterialHandle>) {
    let mut meshes = Vec::new();
    let mut materials = Vec::new();
    for component in scene.templates.iter().flat_map(|template| &template.components) {
        match component {
            ComponentTemplate::Mesh { handle, .. } => meshes.push(MeshHandle(*handle)),
            ComponentTemplate::Material { handle } => materials.push(MaterialHandle(*handle)),
            _ => {}
        }
    }
    (meshes, materials)
}

fn run() -> Result<(), SandboxError> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    logging::init(&config.log_level);
    log::info!("Starting sandbox");

    let scene = match &args.scene {
        Some(path) => SceneDescription::load_from_file(path)?,
        None => {
            log::info!("No scene given, using the built-in arena");
            SceneDescription::from_ron_str(BUILTIN_SCENE)?
        }
    };

    let (meshes, materials) = resources(&scene);
    let mut renderer = LoggingRenderer::new(meshes, materials);
    if let Some(fps) = config.target_fps {
        renderer = renderer.with_log_interval(u64::from(fps));
    }

    let mut engine = Engine::new(config)?;
    engine.load_scene(&scene)?;

    let mut input = ScriptedInput::new(args.frames);
    engine.run(&mut input, &mut renderer)?;

    renderer.report();
    log::info!(
        "Sandbox finished after {} frames ({:.1} simulated seconds)",
        renderer.frames(),
        engine.timer().total_time()
    );
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        log::error!("Sandbox failed: {error}");
        eprintln!("sandbox: {error}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let parsed =
            Args::try_parse_from(["sandbox", "arena.ron", "--frames", "30", "--config", "engine.toml"]).unwrap();
        assert_eq!(parsed.scene, Some(PathBuf::from("arena.ron")));
        assert_eq!(parsed.config, Some(PathBuf::from("engine.toml")));
        assert_eq!(parsed.frames, 30);

        let defaults = Args::try_parse_from(["sandbox"]).unwrap();
        assert_eq!(defaults.scene, None);
        assert_eq!(defaults.frames, DEFAULT_FRAMES);

        assert!(Args::try_parse_from(["sandbox", "--frames", "many"]).is_err());
        assert!(Args::try_parse_from(["sandbox", "a.ron", "b.ron"]).is_err());
        assert!(Args::try_parse_from(["sandbox", "--verbose"]).is_err());
    }

    #[test]
    fn test_args_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_builtin_scene_runs() {
        let scene = SceneDescription::from_ron_str(BUILTIN_SCENE).unwrap();
        let (meshes, materials) = resources(&scene);
        let mut renderer = LoggingRenderer::new(meshes, materials);
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.load_scene(&scene).unwrap();

        let mut input = ScriptedInput::new(120);
        engine.run(&mut input, &mut renderer).unwrap();

        assert_eq!(renderer.frames(), 120);
        assert!(engine.world().active_camera().is_ok());
    }
}
