//! Deck files: the TOML description of a slider.
//!
//! Keys mirror the attributes the widget was historically configured with
//! (`interval`, `target`, `prefix`, `suffix`, `decimals`, `duration`,
//! `start`, `progress`). Numeric attributes may be written either as TOML
//! numbers or as strings; strings are parsed leniently and a value that does
//! not parse is left for the consumer to default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse deck {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A numeric attribute as written in the deck.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Numeric value of the attribute, `None` when it does not parse.
    ///
    /// Infinite values are returned as-is so callers can reject them
    /// explicitly; NaN is treated as unparsable.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            AttrValue::Integer(value) => *value as f64,
            AttrValue::Number(value) => *value,
            AttrValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        (!value.is_nan()).then_some(value)
    }
}

/// Reads an optional attribute, falling back to `default` when it is absent
/// or unparsable.
pub fn number_or(attr: Option<&AttrValue>, default: f64) -> f64 {
    attr.and_then(AttrValue::as_number).unwrap_or(default)
}

/// Converts a finite, positive millisecond count to a `Duration`.
///
/// Values too large for a `Duration` saturate to `Duration::MAX` and values
/// below one nanosecond are raised to one nanosecond, so the result is never
/// zero.
pub fn duration_from_ms(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0)
        .unwrap_or(Duration::MAX)
        .max(Duration::from_nanos(1))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub interval: Option<AttrValue>,
    /// Present when the deck already declares a dots container.
    #[serde(default)]
    pub dots: Option<DotsMarkup>,
    #[serde(default)]
    pub slides: Vec<SlideMarkup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DotsMarkup {
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SlideMarkup {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub counters: Vec<CounterMarkup>,
    #[serde(default)]
    pub progress: Option<ProgressMarkup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CounterMarkup {
    #[serde(default)]
    pub target: Option<AttrValue>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub decimals: Option<AttrValue>,
    #[serde(default)]
    pub duration: Option<AttrValue>,
    #[serde(default)]
    pub start: Option<AttrValue>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressMarkup {
    #[serde(default)]
    pub progress: Option<AttrValue>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let text = fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let deck: Deck = toml::from_str(&text).map_err(|source| DeckError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), slides = deck.slides.len(), "loaded deck");
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
title = "Quarterly KPIs"
interval = "5000"

[dots]

[[slides]]
title = "Revenue"

[[slides.counters]]
target = 1250.5
prefix = "$"
suffix = "k"
decimals = 1

[slides.progress]
progress = "72"
label = "of goal"

[[slides]]
title = "Churn"

[[slides.counters]]
target = "abc"
"#;

    fn write_deck(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_sample_deck() {
        let file = write_deck(SAMPLE);
        let deck = Deck::load(file.path()).unwrap();

        assert_eq!(deck.title.as_deref(), Some("Quarterly KPIs"));
        assert_eq!(deck.interval.as_ref().and_then(AttrValue::as_number), Some(5000.0));
        assert!(deck.dots.is_some());
        assert_eq!(deck.slides.len(), 2);

        let revenue = &deck.slides[0].counters[0];
        assert_eq!(revenue.target.as_ref().and_then(AttrValue::as_number), Some(1250.5));
        assert_eq!(revenue.prefix.as_deref(), Some("$"));
        assert_eq!(number_or(revenue.decimals.as_ref(), 0.0), 1.0);
        assert_eq!(number_or(revenue.duration.as_ref(), 1200.0), 1200.0);

        let progress = deck.slides[0].progress.as_ref().unwrap();
        assert_eq!(number_or(progress.progress.as_ref(), 0.0), 72.0);
        assert!(deck.slides[1].progress.is_none());
        assert_eq!(deck.slides[1].counters[0].target.as_ref().and_then(AttrValue::as_number), None);
    }

    #[test]
    fn test_attr_parsing() {
        assert_eq!(AttrValue::Integer(8000).as_number(), Some(8000.0));
        assert_eq!(AttrValue::Text(" 3.5 ".into()).as_number(), Some(3.5));
        assert_eq!(AttrValue::Text("".into()).as_number(), None);
        assert_eq!(AttrValue::Text("NaN".into()).as_number(), None);
        assert_eq!(AttrValue::Text("inf".into()).as_number(), Some(f64::INFINITY));
        assert_eq!(number_or(None, 7.0), 7.0);
    }

    #[test]
    fn test_duration_from_ms() {
        assert_eq!(duration_from_ms(1200.0), Duration::from_millis(1200));
        assert_eq!(duration_from_ms(1e300), Duration::MAX);
        assert_eq!(duration_from_ms(f64::MAX), Duration::MAX);
        assert_eq!(duration_from_ms(1e-10), Duration::from_nanos(1));
        assert_eq!(duration_from_ms(f64::MIN_POSITIVE), Duration::from_nanos(1));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Deck::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, DeckError::Read { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_deck("slides = [[[");
        let err = Deck::load(file.path()).unwrap_err();
        assert!(matches!(err, DeckError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse deck"));
    }

    #[test]
    fn test_empty_deck() {
        let file = write_deck("");
        let deck = Deck::load(file.path()).unwrap();
        assert!(deck.slides.is_empty());
        assert!(deck.dots.is_none());
        assert!(deck.interval.is_none());
    }
}
