use std::time::Duration;

/// Frames-per-second counter.
///
/// Frames are counted over consecutive one-second windows; `fps()` reports the
/// count of the last completed window and is 0 until the first one completes.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    elapsed: Duration,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            window: Duration::from_secs(1),
            elapsed: Duration::ZERO,
            frames: 0,
            fps: 0,
        }
    }

    /// Records one presented frame that took `delta`.
    pub fn record_frame(&mut self, delta: Duration) {
        self.frames = self.frames.saturating_add(1);
        self.elapsed += delta;

        if self.elapsed >= self.window {
            self.fps = self.frames;
            self.frames = 0;
            // A stall longer than the window restarts counting from zero.
            self.elapsed = self.elapsed.checked_sub(self.window).unwrap_or_default();
            if self.elapsed >= self.window {
                self.elapsed = Duration::ZERO;
            }
        }
    }

    #[inline]
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_until_first_window_completes() {
        let mut fps = FpsCounter::new();
        for _ in 0..59 {
            fps.record_frame(Duration::from_millis(16));
        }
        assert_eq!(fps.fps(), 0);
    }

    #[test]
    fn counts_frames_per_window() {
        let mut fps = FpsCounter::new();
        for _ in 0..100 {
            fps.record_frame(Duration::from_millis(10));
        }
        assert_eq!(fps.fps(), 100);

        for _ in 0..50 {
            fps.record_frame(Duration::from_millis(20));
        }
        assert_eq!(fps.fps(), 50);
    }

    #[test]
    fn stall_reports_single_frame() {
        let mut fps = FpsCounter::new();
        fps.record_frame(Duration::from_secs(3));
        assert_eq!(fps.fps(), 1);

        fps.record_frame(Duration::from_millis(500));
        assert_eq!(fps.fps(), 1);
    }
}
