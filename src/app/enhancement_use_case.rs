use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{BatchMetadata, KpiRecord, ValidationStatus};
use crate::observability::metrics::{emit_counter, emit_gauge, emit_histogram, MetricName};
use crate::pipeline::processing::batch_checks::{
    self, DEFAULT_OUTLIER_THRESHOLD,
};
use crate::pipeline::processing::enhance::{DefaultEnhancer, Enhancer};
use crate::pipeline::processing::summary;

/// Use case for running a batch of candidate KPI records through enhancement
/// and the batch-level quality checks.
pub struct EnhancementUseCase {
    /// The enhancer implementation for per-record enrichment
    enhancer: Box<dyn Enhancer + Send + Sync>,
    /// Z-score threshold for batch outlier detection
    outlier_threshold: f64,
}

/// Full result of processing one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Identifier correlating this batch across logs and metrics
    pub batch_id: Uuid,
    /// Enhanced records, in the caller's original order
    pub records: Vec<KpiRecord>,
    /// Indices of records duplicating an earlier (name, year) pair
    pub duplicates: Vec<usize>,
    /// Batch-level temporal consistency warnings
    pub temporal_warnings: Vec<String>,
    /// Indices of statistical outliers by value
    pub outliers: Vec<usize>,
    /// Indices of records whose unit differs from the batch's most common
    pub unit_inconsistencies: Vec<usize>,
    /// Indices of records whose year differs from the batch's most common
    pub year_inconsistencies: Vec<usize>,
    /// Aggregate statistics over the enhanced records
    pub metadata: BatchMetadata,
    /// When the batch was processed
    pub enhanced_at: DateTime<Utc>,
}

impl EnhancementUseCase {
    /// Create a new use case with the default enhancer and thresholds.
    pub fn new() -> Self {
        Self {
            enhancer: Box::new(DefaultEnhancer::new()),
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }

    /// Create a use case with a custom enhancer implementation.
    pub fn with_enhancer(enhancer: Box<dyn Enhancer + Send + Sync>) -> Self {
        Self {
            enhancer,
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }

    /// Override the z-score threshold used for outlier detection.
    pub fn with_outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = threshold;
        self
    }

    /// Enhance a single candidate record.
    pub fn enhance_record(&self, record: &KpiRecord) -> KpiRecord {
        let enhanced = self.enhancer.enhance(record);

        emit_counter(MetricName::EnhancerRecordsProcessed, 1);
        if let Some(score) = enhanced.confidence_score {
            emit_histogram(MetricName::EnhancerConfidenceScore, f64::from(score));
        }
        if !enhanced.quality_flags.is_empty() {
            emit_counter(
                MetricName::EnhancerFlagsRaised,
                enhanced.quality_flags.len() as u64,
            );
            for flag in &enhanced.quality_flags {
                debug!("quality flag raised for '{}': {}", enhanced.name, flag);
            }
        }
        match enhanced.validation_status {
            Some(ValidationStatus::Valid) => emit_counter(MetricName::EnhancerRecordsValid, 1),
            Some(ValidationStatus::Warning) => {
                emit_counter(MetricName::EnhancerRecordsWarning, 1)
            }
            Some(ValidationStatus::Error) => {
                warn!(
                    "record '{}' failed validation: {:?}",
                    enhanced.name, enhanced.quality_flags
                );
                emit_counter(MetricName::EnhancerRecordsError, 1);
            }
            None => {}
        }

        enhanced
    }

    /// Process a full batch: per-record enhancement, then the batch-level
    /// checks, then the aggregate metadata.
    pub fn enhance_batch(&self, records: &[KpiRecord]) -> Result<BatchReport> {
        let start_time = std::time::Instant::now();
        let batch_id = Uuid::new_v4();
        let batch_size = records.len();

        info!(%batch_id, "starting enhancement for batch of {} records", batch_size);
        emit_counter(MetricName::BatchesProcessed, 1);
        emit_gauge(MetricName::BatchSize, batch_size as f64);

        let enhanced: Vec<KpiRecord> =
            records.iter().map(|r| self.enhance_record(r)).collect();

        let duplicates = batch_checks::detect_duplicates(&enhanced);
        if !duplicates.is_empty() {
            emit_counter(MetricName::ChecksDuplicatesDetected, duplicates.len() as u64);
            info!(%batch_id, "{} duplicate records detected", duplicates.len());
        }

        let temporal_warnings = batch_checks::check_temporal_consistency(&enhanced);
        for warning in &temporal_warnings {
            emit_counter(MetricName::ChecksTemporalWarnings, 1);
            warn!(%batch_id, "{}", warning);
        }

        let outliers = batch_checks::detect_outliers(&enhanced, self.outlier_threshold);
        if !outliers.is_empty() {
            emit_counter(MetricName::ChecksOutliersDetected, outliers.len() as u64);
            info!(%batch_id, "{} statistical outliers detected", outliers.len());
        }

        let unit_inconsistencies = batch_checks::check_unit_consistency(&enhanced);
        if !unit_inconsistencies.is_empty() {
            emit_counter(
                MetricName::ChecksUnitInconsistencies,
                unit_inconsistencies.len() as u64,
            );
        }

        let year_inconsistencies = batch_checks::check_year_consistency(&enhanced);
        if !year_inconsistencies.is_empty() {
            emit_counter(
                MetricName::ChecksYearInconsistencies,
                year_inconsistencies.len() as u64,
            );
        }

        let metadata = summary::summarize(&enhanced);
        emit_gauge(MetricName::BatchAverageConfidence, metadata.average_confidence);

        let duration = start_time.elapsed();
        emit_histogram(MetricName::BatchProcessingDuration, duration.as_secs_f64());
        info!(
            %batch_id,
            "batch complete in {:.2}ms: {}",
            duration.as_millis(),
            metadata.processing_notes
        );

        Ok(BatchReport {
            batch_id,
            records: enhanced,
            duplicates,
            temporal_warnings,
            outliers,
            unit_inconsistencies,
            year_inconsistencies,
            metadata,
            enhanced_at: Utc::now(),
        })
    }
}

impl Default for EnhancementUseCase {
    fn default() -> Self {
        Self::new()
    }
}
