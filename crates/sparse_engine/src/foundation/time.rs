//! Frame timing

use std::time::Instant;

/// High-precision timer for frame timing
///
/// Measures wall-clock time between ticks. An optional clamp caps the delta
/// handed to the simulation so a stall (debugger pause, window drag) does not
/// produce one enormous integration step.
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
    max_delta: Option<f32>,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new unclamped timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
            max_delta: None,
        }
    }

    /// Cap every reported delta at `max_delta` seconds
    pub fn with_max_delta(mut self, max_delta: Option<f32>) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Sample the clock (call once per tick) and return the new delta
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.sample();
        self.advance(elapsed)
    }

    /// Wall-clock seconds since the previous sample, without advancing
    /// simulated time
    pub fn sample(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        elapsed
    }

    /// Seconds since the last sample, without resetting it
    pub fn since_last_sample(&self) -> f32 {
        self.last_frame.elapsed().as_secs_f32()
    }

    /// Advance by an externally measured duration
    ///
    /// Used by fixed-step drivers and tests instead of sampling the clock.
    pub fn advance(&mut self, elapsed: f32) -> f32 {
        let delta = match self.max_delta {
            Some(max) if elapsed > max => {
                log::debug!("Clamping frame delta {:.4}s to {:.4}s", elapsed, max);
                max
            }
            _ => elapsed,
        };
        self.delta_time = delta;
        self.total_time += delta;
        self.frame_count += 1;
        delta
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total simulated time
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unclamped_delta_passes_through() {
        let mut timer = Timer::new();
        assert_relative_eq!(timer.advance(5.0), 5.0);
        assert_relative_eq!(timer.total_time(), 5.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_clamped_delta() {
        let mut timer = Timer::new().with_max_delta(Some(0.1));
        assert_relative_eq!(timer.advance(3.0), 0.1);
        assert_relative_eq!(timer.advance(0.05), 0.05);
        assert_relative_eq!(timer.total_time(), 0.15, epsilon = 1e-6);
    }

    #[test]
    fn test_fps() {
        let mut timer = Timer::new();
        timer.advance(0.5);
        timer.advance(0.5);
        assert_relative_eq!(timer.current_fps(), 2.0);
        assert_relative_eq!(timer.average_fps(), 2.0);
    }
}
