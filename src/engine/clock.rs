//! Time source for the executor's fixed timing windows.

use std::thread;
use std::time::Duration;

/// Something that can wait.
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock waiting, scaled by a playback speed multiplier.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    speed: f64,
}

impl SystemClock {
    /// Slowest allowed multiplier
    pub const MIN_SPEED: f64 = 0.1;
    /// Fastest allowed multiplier
    pub const MAX_SPEED: f64 = 16.0;

    pub fn new(speed: f64) -> Self {
        Self {
            speed: clamp_speed(speed),
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Wall time a nominal duration takes at this speed.
    pub fn scaled(&self, duration: Duration) -> Duration {
        duration.div_f64(self.speed)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Clock for SystemClock {
    fn sleep(&self, duration: Duration) {
        thread::sleep(self.scaled(duration));
    }
}

/// Never waits. Runs a whole scenario as fast as the host can render it.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantClock;

impl Clock for InstantClock {
    fn sleep(&self, _duration: Duration) {}
}

/// Clamp a speed multiplier into the supported range. NaN falls back to 1x.
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return 1.0;
    }
    speed.clamp(SystemClock::MIN_SPEED, SystemClock::MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_clamped() {
        assert_eq!(SystemClock::new(100.0).speed(), 16.0);
        assert_eq!(SystemClock::new(0.0).speed(), 0.1);
        assert_eq!(SystemClock::new(f64::NAN).speed(), 1.0);
    }

    #[test]
    fn scaled_divides_by_speed() {
        let clock = SystemClock::new(2.0);
        assert_eq!(
            clock.scaled(Duration::from_millis(600)),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn instant_clock_returns_immediately() {
        let start = std::time::Instant::now();
        InstantClock.sleep(Duration::from_secs(60));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
