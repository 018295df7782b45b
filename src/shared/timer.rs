//! One-shot action timer keyed on absolute elapsed time.

use std::time::Duration;

/// Fires once per activation, at the first `update` at or past
/// `start + duration`. Inactive timers never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionTimer {
    pub duration: Duration,
    started_at: Option<Duration>,
}

impl ActionTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Start (or restart) the timer at `now`.
    pub fn activate(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    pub fn active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns `true` exactly once per activation.
    pub fn update(&mut self, now: Duration) -> bool {
        match self.started_at {
            Some(start) if now >= start + self.duration => {
                self.started_at = None;
                true
            }
            _ => false,
        }
    }

    /// 0.0 at activation, 1.0 at expiry. 1.0 when inactive.
    pub fn elapsed_fraction(&self, now: Duration) -> f32 {
        match self.started_at {
            Some(start) if !self.duration.is_zero() => {
                (now.saturating_sub(start).as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
            }
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fires_exactly_once() {
        let mut timer = ActionTimer::from_millis(350);
        timer.activate(ms(1000));
        assert!(timer.active());
        assert!(!timer.update(ms(1349)));
        assert!(timer.update(ms(1350)));
        assert!(!timer.active());
        assert!(!timer.update(ms(1400)));
        assert!(!timer.update(ms(5000)));
    }

    #[test]
    fn test_inactive_never_fires() {
        let mut timer = ActionTimer::from_millis(200);
        assert!(!timer.update(ms(10_000)));
    }

    #[test]
    fn test_reactivation_fires_again() {
        let mut timer = ActionTimer::from_millis(200);
        timer.activate(ms(0));
        assert!(timer.update(ms(250)));
        timer.activate(ms(300));
        assert!(!timer.update(ms(450)));
        assert!(timer.update(ms(500)));
    }

    #[test]
    fn test_stays_active_until_it_fires() {
        let mut timer = ActionTimer::from_millis(200);
        timer.activate(ms(0));
        for t in [10, 100, 199] {
            assert!(!timer.update(ms(t)));
            assert!(timer.active());
        }
        assert!(timer.update(ms(200)));
        assert!(!timer.active());
    }

    #[test]
    fn test_elapsed_fraction() {
        let mut timer = ActionTimer::from_millis(200);
        assert_eq!(timer.elapsed_fraction(ms(0)), 1.0);
        timer.activate(ms(100));
        assert!((timer.elapsed_fraction(ms(200)) - 0.5).abs() < 1e-5);
        assert_eq!(timer.elapsed_fraction(ms(900)), 1.0);
    }
}
