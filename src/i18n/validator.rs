//! Language validation gate and the validator facade.
//!
//! `validate_language` answers "is this text written in the expected language?"
//! against a confidence threshold. `TranslationValidator` bundles a shared
//! registry, default thresholds and metrics behind one handle that can be
//! cloned into worker threads.

use crate::config::{ValidationConfig, ValidationOptions};
use crate::i18n::detector::{DetectionResult, LanguageDetector};
use crate::i18n::metrics::ValidationMetrics;
use crate::i18n::quality::{QualityAssessor, QualityReport};
use crate::i18n::registry::LanguageRegistry;
use crate::i18n::scorer::{ConfidenceResult, ConfidenceScorer};
use crate::i18n::text::normalize;
use std::sync::Arc;
use tracing::debug;

/// Check whether `text` is written in `expected_language`.
///
/// Texts whose normalized form is shorter than `config.min_text_length`
/// characters always fail, whatever their content. Otherwise the text passes
/// when its confidence reaches `config.confidence_threshold`.
///
/// `min_indicators_percent` and `min_indicators_absolute` are not consulted.
pub fn validate_language(
    registry: &LanguageRegistry,
    text: &str,
    expected_language: &str,
    config: &ValidationConfig,
) -> bool {
    let length = normalize(text).chars().count();
    if length < config.min_text_length {
        debug!(
            "Text too short to validate as '{}': {} < {} chars",
            expected_language, length, config.min_text_length
        );
        return false;
    }

    let confidence = ConfidenceScorer::score(registry, text, expected_language);
    confidence >= config.confidence_threshold
}

/// Validator for language and translation quality.
///
/// Cloning is cheap and clones share the registry and metrics.
#[derive(Debug, Clone)]
pub struct TranslationValidator {
    registry: Arc<LanguageRegistry>,
    config: ValidationConfig,
    metrics: Arc<ValidationMetrics>,
}

impl Default for TranslationValidator {
    fn default() -> Self {
        Self::new(Arc::new(LanguageRegistry::new()))
    }
}

impl TranslationValidator {
    /// Create a validator over `registry` with default thresholds.
    pub fn new(registry: Arc<LanguageRegistry>) -> Self {
        Self::with_config(registry, ValidationConfig::default())
    }

    /// Create a validator over `registry` with the given default thresholds.
    pub fn with_config(registry: Arc<LanguageRegistry>, config: ValidationConfig) -> Self {
        Self {
            registry,
            config,
            metrics: Arc::new(ValidationMetrics::new()),
        }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn metrics(&self) -> &ValidationMetrics {
        &self.metrics
    }

    /// Confidence in [0, 1] that `text` is written in `language`.
    pub fn score(&self, text: &str, language: &str) -> ConfidenceResult {
        ConfidenceScorer::confidence(&self.registry, text, language)
    }

    /// Detect the most likely language of `text`.
    pub fn detect(&self, text: &str) -> Option<DetectionResult> {
        self.metrics.record_detection();
        LanguageDetector::detect(&self.registry, text)
    }

    /// Validate `text` against `expected_language` using the default thresholds.
    pub fn validate(&self, text: &str, expected_language: &str) -> bool {
        self.validate_with(text, expected_language, &ValidationOptions::default())
    }

    /// Validate `text` against `expected_language`, overriding thresholds
    /// with any keys set in `options`.
    pub fn validate_with(
        &self,
        text: &str,
        expected_language: &str,
        options: &ValidationOptions,
    ) -> bool {
        let config = self.config.with_options(options);
        let valid = validate_language(&self.registry, text, expected_language, &config);
        self.metrics.record_validation(valid);
        valid
    }

    /// Assess how well `translated` renders `original` into `target_language`.
    ///
    /// The language check inside the assessment always uses the built-in
    /// default thresholds, not this validator's configured ones.
    pub fn assess(
        &self,
        original: &str,
        translated: &str,
        source_language: &str,
        target_language: &str,
    ) -> QualityReport {
        let report = QualityAssessor::assess(
            &self.registry,
            &ValidationConfig::default(),
            original,
            translated,
            source_language,
            target_language,
        );
        self.metrics.record_assessment(report.has_issues());
        report
    }
}
