//! Frame timing utilities

use std::time::{Duration, Instant};

/// Tracks per-frame deltas and the cumulative scene clock.
///
/// `elapsed_secs` is the sum of all deltas since construction, which is
/// what the grass shader's time uniform is fed from. It never decreases.
pub struct FrameTimer {
    last_frame: Instant,
    delta: Duration,
    elapsed: f64,
    frame_count: u64,
    fps_timer: Instant,
    fps: f32,
    fps_frame_count: u32,
}

impl FrameTimer {
    /// Create a new frame timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: 0.0,
            frame_count: 0,
            fps_timer: now,
            fps: 0.0,
            fps_frame_count: 0,
        }
    }

    /// Call once per frame to update timing
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed += self.delta.as_secs_f64();
        self.frame_count += 1;
        self.fps_frame_count += 1;

        // Update FPS every second
        let fps_elapsed = now - self.fps_timer;
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_timer = now;
        }
    }

    /// Get delta time in seconds
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Get delta time as Duration
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Cumulative wall-clock time in seconds since construction.
    ///
    /// Accumulated in f64 so long sessions don't lose precision, handed
    /// to the GPU as f32.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed as f32
    }

    /// Get current FPS (updated every second)
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get total frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_monotonic() {
        let mut timer = FrameTimer::new();
        let mut last = timer.elapsed_secs();
        for _ in 0..10 {
            timer.tick();
            let now = timer.elapsed_secs();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_elapsed_accumulates_deltas() {
        let mut timer = FrameTimer::new();
        let mut sum = 0.0f64;
        for _ in 0..5 {
            std::thread::sleep(Duration::from_millis(2));
            timer.tick();
            sum += timer.delta().as_secs_f64();
        }
        assert!((timer.elapsed_secs() as f64 - sum).abs() < 1e-3);
    }

    #[test]
    fn test_frame_count() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.frame_count(), 0);
        timer.tick();
        timer.tick();
        assert_eq!(timer.frame_count(), 2);
    }
}
