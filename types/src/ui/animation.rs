use std::time::Duration;

#[must_use]
pub fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

/// Frame-driven timer: callers feed it deltas instead of reading a clock.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// A timer that starts part-way through, used when an animation
    /// reverses mid-flight.
    #[must_use]
    pub fn starting_at(duration: Duration, progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        Self {
            elapsed: duration.mul_f32(progress),
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        normalized_progress(self.elapsed, self.duration)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}
