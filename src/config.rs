use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Thresholds used by the language validation gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationConfig {
    /// Texts whose normalized form is shorter than this (in characters) never validate
    pub min_text_length: usize,

    /// Reserved: accepted and carried through, not consulted by scoring
    pub min_indicators_percent: f64,

    /// Reserved: accepted and carried through, not consulted by scoring
    pub min_indicators_absolute: usize,

    /// Minimum confidence for a text to count as written in the expected language
    pub confidence_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
            min_indicators_percent: 0.05,
            min_indicators_absolute: 3,
            confidence_threshold: 0.5,
        }
    }
}

impl ValidationConfig {
    /// Load thresholds from the environment, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            min_text_length: std::env::var("VALIDATION_MIN_TEXT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_text_length),
            min_indicators_percent: std::env::var("VALIDATION_MIN_INDICATORS_PERCENT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_indicators_percent),
            min_indicators_absolute: std::env::var("VALIDATION_MIN_INDICATORS_ABSOLUTE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.min_indicators_absolute),
            confidence_threshold: std::env::var("VALIDATION_CONFIDENCE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(defaults.confidence_threshold),
        }
    }

    /// Overlay per-call options on top of this config. Keys the caller did
    /// not supply keep their current value.
    pub fn with_options(&self, options: &ValidationOptions) -> Self {
        Self {
            min_text_length: options.min_text_length.unwrap_or(self.min_text_length),
            min_indicators_percent: options
                .min_indicators_percent
                .unwrap_or(self.min_indicators_percent),
            min_indicators_absolute: options
                .min_indicators_absolute
                .unwrap_or(self.min_indicators_absolute),
            confidence_threshold: options
                .confidence_threshold
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(self.confidence_threshold),
        }
    }
}

/// Per-call overrides for [`ValidationConfig`].
///
/// Deserializes from a JSON object so a host can forward its options map
/// as-is. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidationOptions {
    pub min_text_length: Option<usize>,
    pub min_indicators_percent: Option<f64>,
    pub min_indicators_absolute: Option<usize>,
    pub confidence_threshold: Option<f64>,
}

impl ValidationOptions {
    /// Parse an options map from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse validation options JSON")
    }

    /// Read an options map from a JSON file.
    pub fn from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path))?;
        Self::from_json(&json)
    }
}
