//! Language detection by ranking every registered language's confidence.

use crate::i18n::registry::LanguageRegistry;
use crate::i18n::scorer::{ConfidenceResult, ConfidenceScorer};
use crate::i18n::text::{normalize, tokenize};
use serde::Serialize;
use tracing::debug;

/// Maximum number of runner-up languages reported.
pub const MAX_ALTERNATIVES: usize = 3;

/// Most likely language of a text plus the closest runners-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    /// Detected ISO 639-1 language code
    pub language: String,

    /// Confidence for the detected language
    pub confidence: f64,

    /// Up to three other languages, highest confidence first
    pub alternatives: Vec<ConfidenceResult>,
}

/// Detects languages against a registry.
pub struct LanguageDetector;

impl LanguageDetector {
    /// Score `text` against every registered language.
    ///
    /// Sorted by descending confidence; equal scores are ordered by
    /// language code so results are reproducible.
    pub fn rank(registry: &LanguageRegistry, text: &str) -> Vec<ConfidenceResult> {
        let normalized = normalize(text);
        let tokens = tokenize(&normalized);

        let mut ranking: Vec<ConfidenceResult> = registry
            .supported_languages()
            .into_iter()
            .filter_map(|code| registry.get_profile(&code))
            .map(|profile| {
                let breakdown = ConfidenceScorer::score_tokens(&profile, &tokens);
                ConfidenceResult {
                    language: breakdown.language,
                    confidence: breakdown.confidence,
                }
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.language.cmp(&b.language))
        });
        ranking
    }

    /// Detect the most likely language of `text`.
    ///
    /// # Returns
    /// * `Some(DetectionResult)` with the top-ranked language
    /// * `None` only if the registry has no languages
    pub fn detect(registry: &LanguageRegistry, text: &str) -> Option<DetectionResult> {
        let mut ranking = Self::rank(registry, text).into_iter();
        let top = ranking.next()?;
        let alternatives: Vec<ConfidenceResult> = ranking.take(MAX_ALTERNATIVES).collect();

        debug!(
            "Detected '{}' ({:.4}), alternatives: {:?}",
            top.language,
            top.confidence,
            alternatives
                .iter()
                .map(|alt| alt.language.as_str())
                .collect::<Vec<_>>()
        );

        Some(DetectionResult {
            language: top.language,
            confidence: top.confidence,
            alternatives,
        })
    }
}
