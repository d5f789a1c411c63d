//! Metrics for the ESG KPI pipeline.
//!
//! This module provides a straightforward API for recording metrics using
//! standard Prometheus naming conventions. Only the `metrics` facade is used;
//! the embedding application is responsible for installing a recorder.

use std::fmt;

/// Enum representing all metric names used in the pipeline
/// This eliminates magic strings and provides compile-time safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Enhancer metrics
    EnhancerRecordsProcessed,
    EnhancerConfidenceScore,
    EnhancerFlagsRaised,
    EnhancerRecordsValid,
    EnhancerRecordsWarning,
    EnhancerRecordsError,

    // Batch check metrics
    ChecksDuplicatesDetected,
    ChecksTemporalWarnings,
    ChecksOutliersDetected,
    ChecksUnitInconsistencies,
    ChecksYearInconsistencies,

    // Batch metrics
    BatchesProcessed,
    BatchSize,
    BatchProcessingDuration,
    BatchAverageConfidence,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::EnhancerRecordsProcessed => "esg_enhancer_records_processed_total",
            MetricName::EnhancerConfidenceScore => "esg_enhancer_confidence_score",
            MetricName::EnhancerFlagsRaised => "esg_enhancer_flags_raised_total",
            MetricName::EnhancerRecordsValid => "esg_enhancer_records_valid_total",
            MetricName::EnhancerRecordsWarning => "esg_enhancer_records_warning_total",
            MetricName::EnhancerRecordsError => "esg_enhancer_records_error_total",

            MetricName::ChecksDuplicatesDetected => "esg_checks_duplicates_detected_total",
            MetricName::ChecksTemporalWarnings => "esg_checks_temporal_warnings_total",
            MetricName::ChecksOutliersDetected => "esg_checks_outliers_detected_total",
            MetricName::ChecksUnitInconsistencies => "esg_checks_unit_inconsistencies_total",
            MetricName::ChecksYearInconsistencies => "esg_checks_year_inconsistencies_total",

            MetricName::BatchesProcessed => "esg_batches_processed_total",
            MetricName::BatchSize => "esg_batch_size",
            MetricName::BatchProcessingDuration => "esg_batch_processing_duration_seconds",
            MetricName::BatchAverageConfidence => "esg_batch_average_confidence",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Increment a counter metric
pub fn emit_counter(name: MetricName, value: u64) {
    ::metrics::counter!(name.as_str()).increment(value);
}

/// Record a histogram observation
pub fn emit_histogram(name: MetricName, value: f64) {
    ::metrics::histogram!(name.as_str()).record(value);
}

/// Set a gauge metric
pub fn emit_gauge(name: MetricName, value: f64) {
    ::metrics::gauge!(name.as_str()).set(value);
}
