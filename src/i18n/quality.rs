//! Translation quality assessment.
//!
//! Compares an original text with its translation and flags likely problems:
//! the translation is not in the target language, its length is far off the
//! original's, or long words from the original survive verbatim.

use crate::config::ValidationConfig;
use crate::i18n::registry::LanguageRegistry;
use crate::i18n::text::{normalize, plain_text_length, tokenize};
use crate::i18n::validator::validate_language;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Penalty when the translation fails the target-language check.
const LANGUAGE_MISMATCH_PENALTY: f64 = 0.5;

/// Translations shorter than this fraction of the original are flagged.
const MIN_LENGTH_RATIO: f64 = 0.3;
const TOO_SHORT_PENALTY: f64 = 0.3;

/// Translations longer than this multiple of the original are flagged.
const MAX_LENGTH_RATIO: f64 = 3.0;
const TOO_LONG_PENALTY: f64 = 0.2;

/// Untranslated ratios above this are flagged.
const MAX_UNTRANSLATED_RATIO: f64 = 0.2;
const UNTRANSLATED_PENALTY_FACTOR: f64 = 0.5;

/// Only original tokens longer than this (in characters) count as untranslated
/// when they reappear in the translation.
const UNTRANSLATED_MIN_TOKEN_CHARS: usize = 4;

/// A problem found in a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityIssue {
    LanguageMismatch,
    TooShort,
    TooLong,
    UntranslatedContent,
}

impl QualityIssue {
    /// Human-readable description of the issue.
    pub fn description(&self) -> &'static str {
        match self {
            QualityIssue::LanguageMismatch => "translated text not in expected language",
            QualityIssue::TooShort => "translated text too short relative to original",
            QualityIssue::TooLong => "translated text too long relative to original",
            QualityIssue::UntranslatedContent => "significant untranslated content detected",
        }
    }

    /// Suggested remedy for the issue.
    pub fn suggestion(&self) -> &'static str {
        match self {
            QualityIssue::LanguageMismatch => "check translation provider configuration",
            QualityIssue::TooShort => "check truncation/length limits",
            QualityIssue::TooLong => "review prompt for extraneous explanation text",
            QualityIssue::UntranslatedContent => "adjust prompt to force full translation",
        }
    }
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Quality report for one translation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    /// Overall quality in [0, 1]
    pub score: f64,

    /// Issues in the order the checks found them, serialized as descriptions
    #[serde(serialize_with = "serialize_descriptions")]
    pub issues: Vec<QualityIssue>,

    /// One suggestion per distinct issue kind
    pub suggestions: Vec<String>,

    /// Share of original tokens that reappear untranslated
    pub untranslated_ratio: f64,
}

fn serialize_descriptions<S>(issues: &[QualityIssue], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(issues.iter().map(QualityIssue::description))
}

impl QualityReport {
    /// Create a clean report with a perfect score.
    pub fn new() -> Self {
        Self {
            score: 1.0,
            issues: Vec::new(),
            suggestions: Vec::new(),
            untranslated_ratio: 0.0,
        }
    }

    /// Check if the report has any issues
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Check if the report is clean (no issues)
    pub fn is_clean(&self) -> bool {
        !self.has_issues()
    }

    /// Issue descriptions, in order.
    pub fn descriptions(&self) -> Vec<&'static str> {
        self.issues.iter().map(QualityIssue::description).collect()
    }

    fn flag(&mut self, issue: QualityIssue, penalty: f64) {
        self.issues.push(issue);
        self.score -= penalty;
    }

    fn finish(mut self) -> Self {
        self.score = self.score.max(0.0);

        let mut seen = HashSet::new();
        self.suggestions = self
            .issues
            .iter()
            .filter(|issue| seen.insert(**issue))
            .map(|issue| issue.suggestion().to_string())
            .collect();
        self
    }
}

impl Default for QualityReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Fraction of original tokens that are long (more than four characters) and
/// also appear verbatim in the translation.
///
/// The denominator is the total original token count; 0.0 if the original
/// has no tokens.
pub fn untranslated_ratio(original: &str, translated: &str) -> f64 {
    let original_normalized = normalize(original);
    let original_tokens = tokenize(&original_normalized);
    if original_tokens.is_empty() {
        return 0.0;
    }

    let translated_normalized = normalize(translated);
    let translated_tokens: HashSet<&str> = tokenize(&translated_normalized).into_iter().collect();

    let untranslated = original_tokens
        .iter()
        .filter(|token| token.chars().count() > UNTRANSLATED_MIN_TOKEN_CHARS)
        .filter(|token| translated_tokens.contains(**token))
        .count();

    untranslated as f64 / original_tokens.len() as f64
}

/// Assesses translation quality against a registry.
pub struct QualityAssessor;

impl QualityAssessor {
    /// Assess how well `translated` renders `original` into `target_language`.
    ///
    /// `source_language` identifies the original's language for logging;
    /// none of the checks depend on it.
    pub fn assess(
        registry: &LanguageRegistry,
        config: &ValidationConfig,
        original: &str,
        translated: &str,
        source_language: &str,
        target_language: &str,
    ) -> QualityReport {
        let mut report = QualityReport::new();

        if !validate_language(registry, translated, target_language, config) {
            report.flag(QualityIssue::LanguageMismatch, LANGUAGE_MISMATCH_PENALTY);
        }

        let original_length = plain_text_length(original) as f64;
        let translated_length = plain_text_length(translated) as f64;
        if translated_length < MIN_LENGTH_RATIO * original_length {
            report.flag(QualityIssue::TooShort, TOO_SHORT_PENALTY);
        } else if translated_length > MAX_LENGTH_RATIO * original_length {
            report.flag(QualityIssue::TooLong, TOO_LONG_PENALTY);
        }

        let ratio = untranslated_ratio(original, translated);
        report.untranslated_ratio = ratio;
        if ratio > MAX_UNTRANSLATED_RATIO {
            report.flag(
                QualityIssue::UntranslatedContent,
                ratio * UNTRANSLATED_PENALTY_FACTOR,
            );
        }

        let report = report.finish();

        if report.has_issues() {
            warn!(
                "Translation {} -> {} scored {:.2}: {:?}",
                source_language,
                target_language,
                report.score,
                report.descriptions()
            );
        } else {
            debug!(
                "Translation {} -> {} passed quality checks",
                source_language, target_language
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: &str = "The committee has decided that the new library will be built \
        on the hill near the river, and it is expected to open before the winter. \
        They were happy with the plan because it was cheaper than they had feared.";

    const SPANISH: &str = "El comité ha decidido que la nueva biblioteca se construirá en la \
        colina cerca del río, y se espera que abra antes del invierno. Ellos están contentos \
        con el plan porque es más barato de lo que temían.";

    fn assess(original: &str, translated: &str, source: &str, target: &str) -> QualityReport {
        QualityAssessor::assess(
            &LanguageRegistry::new(),
            &ValidationConfig::default(),
            original,
            translated,
            source,
            target,
        )
    }

    // ==================== Issue Mapping Tests ====================

    #[test]
    fn test_issue_descriptions() {
        assert_eq!(
            QualityIssue::LanguageMismatch.to_string(),
            "translated text not in expected language"
        );
        assert_eq!(
            QualityIssue::TooShort.description(),
            "translated text too short relative to original"
        );
        assert_eq!(
            QualityIssue::TooLong.description(),
            "translated text too long relative to original"
        );
        assert_eq!(
            QualityIssue::UntranslatedContent.description(),
            "significant untranslated content detected"
        );
    }

    #[test]
    fn test_issue_suggestions() {
        assert_eq!(
            QualityIssue::LanguageMismatch.suggestion(),
            "check translation provider configuration"
        );
        assert_eq!(QualityIssue::TooShort.suggestion(), "check truncation/length limits");
        assert_eq!(
            QualityIssue::TooLong.suggestion(),
            "review prompt for extraneous explanation text"
        );
        assert_eq!(
            QualityIssue::UntranslatedContent.suggestion(),
            "adjust prompt to force full translation"
        );
    }

    #[test]
    fn test_issue_serializes_snake_case() {
        let json = serde_json::to_string(&QualityIssue::UntranslatedContent).unwrap();
        assert_eq!(json, "\"untranslated_content\"");
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_new_is_clean() {
        let report = QualityReport::new();
        assert!(report.is_clean());
        assert_eq!(report.score, 1.0);
    }

    #[test]
    fn test_report_finish_dedups_suggestions_and_clamps() {
        let mut report = QualityReport::new();
        report.flag(QualityIssue::TooShort, 0.8);
        report.flag(QualityIssue::TooShort, 0.8);

        let report = report.finish();
        assert_eq!(report.score, 0.0);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.suggestions, vec!["check truncation/length limits"]);
    }

    #[test]
    fn test_report_serializes_issue_descriptions() {
        let report = assess(ENGLISH, ENGLISH, "en", "es");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(
            json["issues"],
            serde_json::json!([
                "translated text not in expected language",
                "significant untranslated content detected"
            ])
        );
        assert_eq!(json["suggestions"][0], "check translation provider configuration");
    }

    // ==================== Untranslated Ratio Tests ====================

    #[test]
    fn test_untranslated_ratio_identical_text() {
        // 11 tokens, of which "happy" and "today" are longer than four chars
        let text = "the cat is on the mat and it was happy today";
        assert!((untranslated_ratio(text, text) - 2.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_untranslated_ratio_no_overlap() {
        assert_eq!(untranslated_ratio(ENGLISH, SPANISH), 0.0);
    }

    #[test]
    fn test_untranslated_ratio_empty_original() {
        assert_eq!(untranslated_ratio("", "anything at all"), 0.0);
        assert_eq!(untranslated_ratio("<p>!</p>", "anything at all"), 0.0);
    }

    #[test]
    fn test_untranslated_ratio_counts_repeats() {
        // "server" appears twice out of four tokens
        let ratio = untranslated_ratio("server server is up", "el server está");
        assert_eq!(ratio, 0.5);
    }

    // ==================== Assessment Tests ====================

    #[test]
    fn test_assess_good_translation() {
        let report = assess(ENGLISH, SPANISH, "en", "es");
        assert!(report.is_clean(), "issues: {:?}", report.issues);
        assert_eq!(report.score, 1.0);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_assess_short_pair_fails_length_gate() {
        // Normalized translation is under min_text_length, so the language
        // check cannot pass however Spanish it looks
        let report = assess(
            "Hello world, this is a test.",
            "Hola mundo, esta es una prueba.",
            "en",
            "es",
        );
        assert_eq!(report.issues, vec![QualityIssue::LanguageMismatch]);
        assert_eq!(report.score, 0.5);
        assert_eq!(report.untranslated_ratio, 0.0);
    }

    #[test]
    fn test_assess_untranslated_copy() {
        let report = assess(ENGLISH, ENGLISH, "en", "es");

        assert_eq!(report.issues[0], QualityIssue::LanguageMismatch);
        assert!(report.issues.contains(&QualityIssue::UntranslatedContent));
        assert!(report.score <= 0.5);
        assert!(report
            .suggestions
            .contains(&"adjust prompt to force full translation".to_string()));
    }

    #[test]
    fn test_assess_too_short() {
        let report = assess(ENGLISH, "El comité ha decidido.", "en", "es");
        assert_eq!(
            report.issues,
            vec![QualityIssue::LanguageMismatch, QualityIssue::TooShort]
        );
        assert!((report.score - 0.2).abs() < 1e-12);
        assert_eq!(
            report.suggestions,
            vec![
                "check translation provider configuration",
                "check truncation/length limits"
            ]
        );
    }

    #[test]
    fn test_assess_too_long() {
        let padded = format!("{} {} {} {}", SPANISH, SPANISH, SPANISH, SPANISH);
        let report = assess(ENGLISH, &padded, "en", "es");
        assert_eq!(report.issues, vec![QualityIssue::TooLong]);
        assert!((report.score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_assess_ignores_markup_in_length() {
        let marked = format!("<div class=\"translation-body\"><p>{}</p></div>", SPANISH);
        let report = assess(ENGLISH, &marked, "en", "es");
        assert!(report.is_clean(), "issues: {:?}", report.issues);
    }

    #[test]
    fn test_assess_score_never_negative() {
        let report = assess(ENGLISH, "", "en", "es");
        assert!(report.score >= 0.0);
        assert!(report.issues.contains(&QualityIssue::TooShort));
    }

    #[test]
    fn test_assess_unregistered_target() {
        let report = assess(ENGLISH, SPANISH, "en", "xx");
        assert_eq!(report.issues, vec![QualityIssue::LanguageMismatch]);
    }
}
