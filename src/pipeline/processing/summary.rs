//! Batch metadata: aggregate statistics over an enhanced batch.

use crate::domain::{BatchMetadata, KpiRecord, ValidationStatus};

/// Aggregate enhancement results across a batch.
///
/// An empty batch returns the fixed all-zero payload. Records that somehow
/// lack a confidence score contribute zero to the average rather than being
/// excluded.
pub fn summarize(records: &[KpiRecord]) -> BatchMetadata {
    if records.is_empty() {
        return BatchMetadata {
            total_metrics_found: 0,
            average_confidence: 0.0,
            validation_errors: 0,
            warnings: 0,
            processing_notes: "No metrics found".to_string(),
        };
    }

    let score_sum: u64 = records
        .iter()
        .map(|r| u64::from(r.confidence_score.unwrap_or(0)))
        .sum();
    let average_confidence = (score_sum as f64 / records.len() as f64 * 10.0).round() / 10.0;

    let validation_errors = records
        .iter()
        .filter(|r| r.validation_status == Some(ValidationStatus::Error))
        .count();
    let warnings = records
        .iter()
        .filter(|r| r.validation_status == Some(ValidationStatus::Warning))
        .count();

    BatchMetadata {
        total_metrics_found: records.len(),
        average_confidence,
        validation_errors,
        warnings,
        processing_notes: format!(
            "Extracted {} metrics with {} errors and {} warnings",
            records.len(),
            validation_errors,
            warnings
        ),
    }
}
