pub mod config;
pub mod i18n;

pub use config::{ValidationConfig, ValidationOptions};
pub use i18n::{
    ConfidenceResult, DetectionResult, LanguageRegistry, QualityIssue, QualityReport,
    TranslationValidator,
};
