//! Per-record enrichment: confidence scoring, quality flags, and the derived
//! validation status. This is the orchestration point for the unit and range
//! validators and the confidence scorer.

use serde::{Deserialize, Serialize};

use crate::domain::{EsgPillar, KpiRecord, QualityFlag, ValidationStatus};
use crate::pipeline::processing::{confidence, validate};

/// Trait for implementing KPI enhancement logic
pub trait Enhancer {
    /// Produce an enriched copy of a candidate record.
    fn enhance(&self, record: &KpiRecord) -> KpiRecord;
}

/// Configuration for enhancement rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancerConfig {
    /// Scores strictly below this raise the `low_confidence` flag
    pub low_confidence_threshold: u8,
    /// Pillar used for unit validation when a record carries none
    pub default_pillar: EsgPillar,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: 50,
            default_pillar: EsgPillar::Environmental,
        }
    }
}

/// Default enhancer implementation with configurable rules
pub struct DefaultEnhancer {
    pub config: EnhancerConfig,
}

impl DefaultEnhancer {
    pub fn new() -> Self {
        Self {
            config: EnhancerConfig::default(),
        }
    }

    pub fn with_config(config: EnhancerConfig) -> Self {
        Self { config }
    }

    /// Recompute the full flag set for a record. Always from scratch, so a
    /// second pass over an already-enhanced record yields the same flags.
    fn compute_flags(&self, record: &KpiRecord, confidence_score: u8) -> Vec<QualityFlag> {
        let mut flags = Vec::new();

        let pillar = record.pillar.unwrap_or(self.config.default_pillar);
        if !validate::validate_units(&record.metric_type, pillar) {
            flags.push(QualityFlag::UnclearUnits);
        }

        if !validate::validate_range(&record.value, &record.metric_type) {
            flags.push(QualityFlag::UnreasonableValue);
        }

        if record.year.is_none() {
            flags.push(QualityFlag::MissingYear);
        }

        if confidence_score < self.config.low_confidence_threshold {
            flags.push(QualityFlag::LowConfidence);
        }

        flags
    }
}

impl Enhancer for DefaultEnhancer {
    fn enhance(&self, record: &KpiRecord) -> KpiRecord {
        let mut enhanced = record.clone();

        // Score only when the extraction step did not already supply one
        if enhanced.confidence_score.is_none() {
            let (score, reasoning) = confidence::score(
                &enhanced.name,
                &enhanced.value,
                &enhanced.metric_type,
                &enhanced.reference,
            );
            enhanced.confidence_score = Some(score);
            enhanced.confidence_reasoning = Some(reasoning);
        }

        let score = enhanced.confidence_score.unwrap_or(0);
        enhanced.quality_flags = self.compute_flags(&enhanced, score);
        enhanced.validation_status = Some(ValidationStatus::from_flags(&enhanced.quality_flags));

        enhanced
    }
}

impl Default for DefaultEnhancer {
    fn default() -> Self {
        Self::new()
    }
}
