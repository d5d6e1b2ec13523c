use std::time::Duration;

use tracing::debug;

use crate::constants::*;
use crate::deck::{duration_from_ms, AttrValue};
use crate::state::AutoRotateState;

/// Turns the configured period into a timer interval.
///
/// A missing or unparsable value falls back to the default period; a value
/// that parses but is not finite and positive disables auto-rotation. Huge
/// periods saturate and sub-nanosecond ones become one nanosecond.
pub fn resolve_interval(attr: Option<&AttrValue>) -> Option<Duration> {
    let ms = attr.and_then(AttrValue::as_number).unwrap_or(DEFAULT_INTERVAL_MS);
    (ms.is_finite() && ms > 0.0).then(|| duration_from_ms(ms))
}

#[derive(Debug, Clone)]
pub struct AutoRotate {
    state: AutoRotateState,
    interval: Option<Duration>,
    elapsed: Duration,
}

impl AutoRotate {
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            state: AutoRotateState::Stopped,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Arms the timer from zero. Refused under reduced motion, with fewer than
    /// two slides, or without a usable interval.
    pub fn start(&mut self, reduced_motion: bool, slide_count: usize) -> bool {
        if reduced_motion || slide_count <= 1 || self.interval.is_none() {
            return false;
        }
        self.stop();
        self.state = AutoRotateState::Running;
        self.elapsed = Duration::ZERO;
        debug!(interval = ?self.interval, "auto-rotate started");
        true
    }

    pub fn stop(&mut self) {
        if self.state == AutoRotateState::Running {
            debug!("auto-rotate stopped");
        }
        self.state = AutoRotateState::Stopped;
        self.elapsed = Duration::ZERO;
    }

    /// Advances the timer and returns how many intervals elapsed, saturating
    /// at `u32::MAX`. A zero interval never fires.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        let Some(interval) = self.interval.filter(|i| !i.is_zero()) else {
            return 0;
        };
        if self.state != AutoRotateState::Running {
            return 0;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        let fired = self.elapsed.as_nanos() / interval.as_nanos();
        if fired == 0 {
            return 0;
        }

        // Remainder is below `elapsed`, so its seconds fit in a u64
        let rest = self.elapsed.as_nanos() % interval.as_nanos();
        self.elapsed = Duration::new((rest / 1_000_000_000) as u64, (rest % 1_000_000_000) as u32);
        u32::try_from(fired).unwrap_or(u32::MAX)
    }

    pub fn state(&self) -> AutoRotateState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_interval() {
        assert_eq!(resolve_interval(None), Some(Duration::from_millis(8000)));
        assert_eq!(resolve_interval(Some(&AttrValue::Text("junk".into()))), Some(Duration::from_millis(8000)));
        assert_eq!(resolve_interval(Some(&AttrValue::Integer(1000))), Some(Duration::from_millis(1000)));
        assert_eq!(resolve_interval(Some(&AttrValue::Integer(0))), None);
        assert_eq!(resolve_interval(Some(&AttrValue::Integer(-5))), None);
        assert_eq!(resolve_interval(Some(&AttrValue::Text("inf".into()))), None);
    }

    #[test]
    fn test_resolve_interval_extremes() {
        assert_eq!(resolve_interval(Some(&AttrValue::Number(1e300))), Some(Duration::MAX));
        assert_eq!(resolve_interval(Some(&AttrValue::Text("1e300".into()))), Some(Duration::MAX));
        assert_eq!(resolve_interval(Some(&AttrValue::Text("1e-10".into()))), Some(Duration::from_nanos(1)));
        assert_eq!(resolve_interval(Some(&AttrValue::Number(f64::MIN_POSITIVE))), Some(Duration::from_nanos(1)));
    }

    #[test]
    fn test_tick_with_degenerate_intervals() {
        let mut zero = AutoRotate::new(Some(Duration::ZERO));
        assert!(zero.start(false, 3));
        assert_eq!(zero.tick(Duration::from_millis(16)), 0);

        let mut huge = AutoRotate::new(Some(Duration::MAX));
        huge.start(false, 3);
        assert_eq!(huge.tick(Duration::from_secs(3600)), 0);
        // Elapsed time saturates instead of overflowing
        assert_eq!(huge.tick(Duration::MAX), 1);
        assert_eq!(huge.tick(Duration::from_secs(1)), 0);

        let mut tiny = AutoRotate::new(Some(Duration::from_nanos(1)));
        tiny.start(false, 3);
        assert_eq!(tiny.tick(Duration::from_millis(16)), 16_000_000);
        assert_eq!(tiny.tick(Duration::from_secs(10)), u32::MAX);
        assert_eq!(tiny.tick(Duration::ZERO), 0);
    }

    #[test]
    fn test_start_guards() {
        let mut timer = AutoRotate::new(Some(Duration::from_secs(1)));
        assert_eq!(timer.state(), AutoRotateState::Stopped);
        assert!(!timer.start(true, 3));
        assert!(!timer.start(false, 1));
        assert_eq!(timer.state(), AutoRotateState::Stopped);

        let mut disabled = AutoRotate::new(None);
        assert!(!disabled.start(false, 3));

        assert!(timer.start(false, 3));
        assert_eq!(timer.state(), AutoRotateState::Running);
    }

    #[test]
    fn test_tick_fires_per_interval() {
        let mut timer = AutoRotate::new(Some(Duration::from_millis(1000)));
        assert_eq!(timer.tick(Duration::from_millis(5000)), 0);

        timer.start(false, 2);
        assert_eq!(timer.tick(Duration::from_millis(999)), 0);
        assert_eq!(timer.tick(Duration::from_millis(1)), 1);
        assert_eq!(timer.tick(Duration::from_millis(2500)), 2);
        assert_eq!(timer.tick(Duration::from_millis(500)), 1);
    }

    #[test]
    fn test_restart_resets_elapsed() {
        let mut timer = AutoRotate::new(Some(Duration::from_millis(1000)));
        timer.start(false, 2);
        timer.tick(Duration::from_millis(900));
        timer.start(false, 2);
        assert_eq!(timer.tick(Duration::from_millis(900)), 0);

        timer.stop();
        assert_eq!(timer.tick(Duration::from_millis(2000)), 0);
    }
}
