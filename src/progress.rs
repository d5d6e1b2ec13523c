use crate::deck::{number_or, ProgressMarkup};

/// Progress bar attached to a slide.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    value: f64,
    pub label: Option<String>,

    fill: f64,
    value_text: String,
}

impl ProgressIndicator {
    pub fn from_markup(markup: &ProgressMarkup) -> Self {
        let raw = number_or(markup.progress.as_ref(), 0.0);
        let value = raw.clamp(0.0, 100.0);
        Self {
            value,
            label: markup.label.clone(),
            fill: 0.0,
            value_text: format!("{}%", value),
        }
    }

    /// Fills the bar when its slide is active and empties it otherwise. The
    /// label always shows the clamped value.
    pub fn refresh(&mut self, is_active: bool) {
        self.fill = if is_active { self.value } else { 0.0 };
        self.value_text = format!("{}%", self.value);
    }

    #[cfg(test)]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current fill in percent.
    pub fn fill(&self) -> f64 {
        self.fill
    }

    pub fn value_text(&self) -> &str {
        &self.value_text
    }
}
