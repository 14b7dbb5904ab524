//! Property tests for scoring, detection and validation invariants.

use language_validator::config::ValidationConfig;
use language_validator::i18n::{
    normalize, validate_language, ConfidenceScorer, LanguageDetector, LanguageRegistry,
    MAX_ALTERNATIVES,
};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Mixed-language word soup with markup and punctuation sprinkled in.
fn text_strategy() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        "[a-zA-Z]{1,10}",
        Just("the".to_string()),
        Just("and".to_string()),
        Just("la".to_string()),
        Just("der".to_string()),
        Just("est".to_string()),
        Just("été".to_string()),
        Just("<b>".to_string()),
        Just("!!".to_string()),
        "\\PC{1,6}",
    ];
    prop::collection::vec(word, 0..60).prop_map(|words| words.join(" "))
}

/// JSON values that are not objects.
fn non_mapping_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,20}".prop_map(Value::from),
        prop::collection::vec("[a-z]{1,8}", 0..5).prop_map(|words| json!(words)),
    ]
}

proptest! {
    #[test]
    fn prop_score_in_unit_interval(text in text_strategy()) {
        let registry = LanguageRegistry::new();
        for code in registry.supported_languages() {
            let score = ConfidenceScorer::score(&registry, &text, &code);
            prop_assert!((0.0..=1.0).contains(&score), "{} scored {}", code, score);
        }
    }

    #[test]
    fn prop_fewer_than_five_tokens_scores_zero(
        words in prop::collection::vec("[a-z]{2,8}", 0..5)
    ) {
        let registry = LanguageRegistry::new();
        let text = words.join(" ");
        for code in registry.supported_languages() {
            prop_assert_eq!(ConfidenceScorer::score(&registry, &text, &code), 0.0);
        }
    }

    #[test]
    fn prop_short_text_never_validates(text in text_strategy()) {
        let registry = LanguageRegistry::new();
        let length = normalize(&text).chars().count();
        let config = ValidationConfig {
            min_text_length: length + 1,
            confidence_threshold: 0.0,
            ..Default::default()
        };
        for code in registry.supported_languages() {
            prop_assert!(!validate_language(&registry, &text, &code, &config));
        }
    }

    #[test]
    fn prop_detection_shape(text in text_strategy()) {
        let registry = LanguageRegistry::new();
        let result = LanguageDetector::detect(&registry, &text).unwrap();

        prop_assert!(registry.is_supported(&result.language));
        prop_assert!(result.alternatives.len() <= MAX_ALTERNATIVES);
        prop_assert!(result.alternatives.iter().all(|alt| alt.language != result.language));
        prop_assert!(result
            .alternatives
            .iter()
            .all(|alt| alt.confidence <= result.confidence));
    }

    #[test]
    fn prop_scores_are_deterministic(text in text_strategy()) {
        let registry = LanguageRegistry::new();
        let first = LanguageDetector::rank(&registry, &text);
        let second = LanguageDetector::rank(&registry, &text);
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(&a.language, &b.language);
            prop_assert_eq!(a.confidence.to_bits(), b.confidence.to_bits());
        }
    }

    #[test]
    fn prop_malformed_merge_changes_nothing(
        text in text_strategy(),
        rules in non_mapping_strategy(),
    ) {
        let registry = LanguageRegistry::new();
        let before = ConfidenceScorer::score(&registry, &text, "en");
        let profile_before = registry.get_profile("en").unwrap();

        prop_assert!(!registry.merge_rules("en", &rules));

        prop_assert_eq!(ConfidenceScorer::score(&registry, &text, "en"), before);
        let profile_after = registry.get_profile("en").unwrap();
        prop_assert_eq!(&*profile_after, &*profile_before);
    }
}
