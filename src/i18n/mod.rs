//! Language detection and translation quality validation.
//!
//! Everything here is a synchronous, CPU-bound function of its inputs and a
//! [`LanguageRegistry`]. The registry is passed in explicitly; there is no
//! process-wide state.
//!
//! # Architecture
//!
//! - `registry`: Language profiles (indicator word lists per language)
//! - `text`: Markup stripping, normalization and tokenization
//! - `scorer`: Confidence that a text is written in one language
//! - `detector`: Ranks every registered language for a text
//! - `validator`: Threshold gate and the `TranslationValidator` facade
//! - `quality`: Translation quality reports
//! - `metrics`: Per-validator counters
//!
//! # Example
//!
//! ```rust
//! use language_validator::i18n::{LanguageRegistry, TranslationValidator};
//! use std::sync::Arc;
//!
//! let validator = TranslationValidator::new(Arc::new(LanguageRegistry::new()));
//!
//! let text = "The committee has decided that the new library will be built on the hill \
//!     near the river, and it is expected to open before the winter.";
//! assert!(validator.validate(text, "en"));
//! assert_eq!(validator.detect(text).unwrap().language, "en");
//! ```

mod detector;
mod metrics;
mod quality;
mod registry;
mod scorer;
mod text;
mod validator;

pub use detector::{DetectionResult, LanguageDetector, MAX_ALTERNATIVES};
pub use metrics::{MetricsReport, ValidationMetrics};
pub use quality::{untranslated_ratio, QualityAssessor, QualityIssue, QualityReport};
pub use registry::{IndicatorCategories, LanguageProfile, LanguageRegistry, RuleError, WordSet};
pub use scorer::{category_weight, ConfidenceResult, ConfidenceScorer, ScoreBreakdown};
pub use text::{normalize, plain_text_length, strip_markup, tokenize};
pub use validator::{validate_language, TranslationValidator};
