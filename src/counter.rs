use std::time::Duration;

use tracing::{trace, warn};

use crate::constants::*;
use crate::deck::{duration_from_ms, number_or, AttrValue, CounterMarkup};

/// Rounds `value` to `decimals` places (halves round up) and renders exactly
/// that many decimals.
pub fn format_value(value: f64, decimals: u32) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor + 0.5).floor() / factor;
    format!("{:.*}", decimals as usize, rounded)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CounterState {
    Pending,                        // Never animated
    Running { elapsed: Duration },  // Interpolating toward the target
    Complete,                       // Snapped to the target, never replayed
}

#[derive(Debug, Clone)]
pub struct Counter {
    target: Option<f64>,
    start: f64,
    decimals: u32,
    duration: Duration,
    prefix: String,
    suffix: String,
    pub label: Option<String>,

    text: String,
    state: CounterState,
}

impl Counter {
    pub fn from_markup(markup: &CounterMarkup) -> Self {
        let target = markup.target.as_ref().and_then(AttrValue::as_number).filter(|t| t.is_finite());
        if target.is_none() {
            warn!(target = ?markup.target, "counter target is not numeric, it will not animate");
        }

        let decimals = number_or(markup.decimals.as_ref(), 0.0);
        let decimals = if decimals.is_finite() {
            decimals.trunc().clamp(0.0, MAX_DECIMALS as f64) as u32
        } else {
            0
        };

        let duration_ms = number_or(markup.duration.as_ref(), DEFAULT_COUNTER_DURATION_MS);
        let duration = if !duration_ms.is_finite() {
            duration_from_ms(DEFAULT_COUNTER_DURATION_MS)
        } else if duration_ms <= 0.0 {
            Duration::ZERO
        } else {
            duration_from_ms(duration_ms)
        };

        let start = number_or(markup.start.as_ref(), 0.0);
        let start = if start.is_finite() { start } else { 0.0 };

        let mut counter = Self {
            target,
            start,
            decimals,
            duration,
            prefix: markup.prefix.clone().unwrap_or_default(),
            suffix: markup.suffix.clone().unwrap_or_default(),
            label: markup.label.clone(),
            text: String::new(),
            state: CounterState::Pending,
        };
        counter.text = counter.render(start);
        counter
    }

    fn render(&self, value: f64) -> String {
        format!("{}{}{}", self.prefix, format_value(value, self.decimals), self.suffix)
    }

    /// Starts the count-up toward the target.
    ///
    /// Under reduced motion the target is written immediately. A completed
    /// counter is left untouched; a running one restarts from its start value.
    pub fn animate(&mut self, reduced_motion: bool) {
        let Some(target) = self.target else {
            return;
        };

        if reduced_motion {
            self.text = self.render(target);
            self.state = CounterState::Complete;
            return;
        }

        if self.state == CounterState::Complete {
            return;
        }

        self.state = CounterState::Running { elapsed: Duration::ZERO };
        self.text = self.render(self.start);
    }

    /// Advances a running animation by one frame.
    pub fn update(&mut self, dt: Duration) {
        let (CounterState::Running { elapsed }, Some(target)) = (self.state, self.target) else {
            return;
        };

        let elapsed = elapsed.saturating_add(dt);
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };

        if progress < 1.0 {
            let current = self.start + (target - self.start) * progress;
            self.text = self.render(current);
            self.state = CounterState::Running { elapsed };
        } else {
            self.text = self.render(target);
            self.state = CounterState::Complete;
            trace!(text = %self.text, "counter complete");
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn state(&self) -> CounterState {
        self.state
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.state == CounterState::Complete
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, CounterState::Running { .. })
    }
}
