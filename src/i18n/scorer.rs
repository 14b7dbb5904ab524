//! Confidence scoring: how strongly a text looks like a given language.
//!
//! The score is built from the share of tokens that are indicator words
//! (articles, prepositions, ...) in the language's profile, blended with a
//! per-category weighted share, penalized for short texts, then doubled and
//! capped at 1.0. Indicator words are a minority of any real text, so the
//! doubling spreads typical scores over the usable range without changing
//! the ordering between languages.

use crate::i18n::registry::{LanguageProfile, LanguageRegistry};
use crate::i18n::text::{normalize, tokenize};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Texts with fewer tokens than this always score 0.0.
pub const MIN_TOKENS: usize = 5;

/// Texts with fewer tokens than this get a linear penalty.
pub const SHORT_TEXT_TOKENS: usize = 20;

const BASE_SHARE: f64 = 0.4;
const WEIGHTED_SHARE: f64 = 0.6;
const AMPLIFICATION: f64 = 2.0;

/// Weight applied to a category's match share.
pub fn category_weight(category: &str) -> f64 {
    match category {
        "articles" => 1.5,
        "prepositions" => 1.2,
        "auxiliary_verbs" => 1.3,
        "pronouns" => 1.0,
        "conjunctions" => 1.1,
        _ => 1.0,
    }
}

/// Confidence that a text is written in one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceResult {
    /// ISO 639-1 language code
    pub language: String,

    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// Every intermediate value of a score, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub language: String,
    pub token_count: usize,
    pub found_indicators: usize,
    /// Matching tokens per category
    pub category_matches: BTreeMap<String, usize>,
    pub base_score: f64,
    pub weighted_score: f64,
    /// Final clamped score, identical to [`ConfidenceScorer::score`]
    pub confidence: f64,
}

impl ScoreBreakdown {
    fn zero(language: &str, token_count: usize) -> Self {
        Self {
            language: language.to_string(),
            token_count,
            found_indicators: 0,
            category_matches: BTreeMap::new(),
            base_score: 0.0,
            weighted_score: 0.0,
            confidence: 0.0,
        }
    }
}

/// Scores texts against language profiles in a registry.
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Confidence in [0, 1] that `text` is written in `language`.
    ///
    /// Returns 0.0 for unregistered languages and for texts with fewer
    /// than five tokens.
    pub fn score(registry: &LanguageRegistry, text: &str, language: &str) -> f64 {
        Self::breakdown(registry, text, language).confidence
    }

    /// Score `text` against `language`, wrapped with its language code.
    pub fn confidence(registry: &LanguageRegistry, text: &str, language: &str) -> ConfidenceResult {
        ConfidenceResult {
            language: language.to_string(),
            confidence: Self::score(registry, text, language),
        }
    }

    /// Score `text` against `language`, keeping every intermediate value.
    pub fn breakdown(registry: &LanguageRegistry, text: &str, language: &str) -> ScoreBreakdown {
        let Some(profile) = registry.get_profile(language) else {
            debug!("Language '{}' is not registered, scoring 0", language);
            return ScoreBreakdown::zero(language, 0);
        };

        let normalized = normalize(text);
        let tokens = tokenize(&normalized);
        Self::score_tokens(&profile, &tokens)
    }

    /// Score already-tokenized text against a profile.
    pub fn score_tokens(profile: &LanguageProfile, tokens: &[&str]) -> ScoreBreakdown {
        let total = tokens.len();
        if total < MIN_TOKENS {
            return ScoreBreakdown::zero(&profile.code, total);
        }
        let total_f = total as f64;

        let mut found_indicators = 0;
        let mut category_matches = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for (category, words) in &profile.categories {
            let matches = tokens.iter().filter(|t| words.contains(**t)).count();
            let weight = category_weight(category);

            found_indicators += matches;
            weighted_sum += (matches as f64 / total_f) * weight;
            total_weight += weight;
            category_matches.insert(category.clone(), matches);
        }

        let base_score = found_indicators as f64 / total_f;
        let weighted_score = if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        };

        let mut final_score = base_score * BASE_SHARE + weighted_score * WEIGHTED_SHARE;
        if total < SHORT_TEXT_TOKENS {
            final_score *= total_f / SHORT_TEXT_TOKENS as f64;
        }
        let confidence = (final_score * AMPLIFICATION).clamp(0.0, 1.0);

        debug!(
            "Scored '{}': {} tokens, {} indicators, confidence {:.4}",
            profile.code, total, found_indicators, confidence
        );

        ScoreBreakdown {
            language: profile.code.clone(),
            token_count: total,
            found_indicators,
            category_matches,
            base_score,
            weighted_score,
            confidence,
        }
    }
}
