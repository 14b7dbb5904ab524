//! Validation metrics and observability module.
//!
//! Counts validations, detections and quality assessments. Counters are owned
//! by a [`TranslationValidator`](crate::i18n::TranslationValidator) instance,
//! never influence results, and keep no history beyond the totals.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Running totals for one validator instance.
#[derive(Debug, Default)]
pub struct ValidationMetrics {
    /// Number of language validations performed
    validations: AtomicUsize,

    /// Number of validations that met the confidence threshold
    validations_passed: AtomicUsize,

    /// Number of language detections performed
    detections: AtomicUsize,

    /// Number of translation quality assessments performed
    assessments: AtomicUsize,

    /// Number of assessments that reported at least one issue
    assessments_flagged: AtomicUsize,
}

impl ValidationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a validation and whether it passed.
    pub fn record_validation(&self, passed: bool) {
        self.validations.fetch_add(1, Ordering::Relaxed);
        if passed {
            self.validations_passed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a language detection.
    pub fn record_detection(&self) {
        self.detections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a quality assessment and whether it raised issues.
    pub fn record_assessment(&self, flagged: bool) {
        self.assessments.fetch_add(1, Ordering::Relaxed);
        if flagged {
            self.assessments_flagged.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn validations(&self) -> usize {
        self.validations.load(Ordering::Relaxed)
    }

    pub fn validations_passed(&self) -> usize {
        self.validations_passed.load(Ordering::Relaxed)
    }

    pub fn detections(&self) -> usize {
        self.detections.load(Ordering::Relaxed)
    }

    pub fn assessments(&self) -> usize {
        self.assessments.load(Ordering::Relaxed)
    }

    pub fn assessments_flagged(&self) -> usize {
        self.assessments_flagged.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let validations = self.validations();
        let passed = self.validations_passed();
        let validation_pass_rate = if validations > 0 {
            (passed as f64 / validations as f64) * 100.0
        } else {
            0.0
        };

        let assessments = self.assessments();
        let flagged = self.assessments_flagged();
        let assessment_flag_rate = if assessments > 0 {
            (flagged as f64 / assessments as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            validations,
            validations_passed: passed,
            validation_pass_rate,
            detections: self.detections(),
            assessments,
            assessments_flagged: flagged,
            assessment_flag_rate,
        }
    }
}

/// Snapshot of validation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub validations: usize,
    pub validations_passed: usize,

    /// Share of validations that passed, as a percentage (0-100)
    pub validation_pass_rate: f64,

    pub detections: usize,
    pub assessments: usize,
    pub assessments_flagged: usize,

    /// Share of assessments that reported issues, as a percentage (0-100)
    pub assessment_flag_rate: f64,
}
