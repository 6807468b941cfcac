/// Longest frame the accumulator will absorb; anything longer is dropped
/// rather than caught up.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Fixed-timestep accumulator for the outer loop.
///
/// Feed it wall-clock frame durations; it answers how many fixed steps to run.
/// It never reads a clock itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedStepper {
    dt: f32,
    accumulator: f32,
    max_frame_time: f32,
}

impl FixedStepper {
    /// # Panics
    ///
    /// If `dt` is not a positive finite number.
    pub fn new(dt: f32) -> Self {
        assert!(dt > 0.0 && dt.is_finite(), "fixed step must be positive, got {dt}");
        Self {
            dt,
            accumulator: 0.0,
            max_frame_time: MAX_FRAME_TIME,
        }
    }

    pub fn with_max_frame_time(mut self, max_frame_time: f32) -> Self {
        self.max_frame_time = max_frame_time;
        self
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add `frame_time` seconds and return the number of whole steps now due.
    pub fn advance(&mut self, frame_time: f32) -> usize {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > self.max_frame_time {
            log::warn!(
                "frame took {:.3}s, clamping to {:.3}s",
                frame_time,
                self.max_frame_time
            );
            frame_time = self.max_frame_time;
        }
        self.accumulator += frame_time;
        let mut steps = 0;
        while self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            steps += 1;
        }
        steps
    }

    /// Leftover fraction of a step, in `[0, 1)`, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
