use serde::{Deserialize, Serialize};
use std::fmt;

/// The three top-level ESG reporting pillars.
///
/// Every KPI record carries the pillar it was extracted under; the Unit
/// Validator selects its allow-list from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EsgPillar {
    Environmental,
    Social,
    Governance,
}

impl EsgPillar {
    pub fn as_str(&self) -> &'static str {
        match self {
            EsgPillar::Environmental => "environmental",
            EsgPillar::Social => "social",
            EsgPillar::Governance => "governance",
        }
    }

    /// All pillars, in the order extraction payloads list them.
    pub fn all() -> [EsgPillar; 3] {
        [
            EsgPillar::Environmental,
            EsgPillar::Social,
            EsgPillar::Governance,
        ]
    }
}

impl fmt::Display for EsgPillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Short codes marking specific validation concerns on a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    /// The declared unit is not plausible for the record's pillar
    UnclearUnits,
    /// The numeric value is outside the plausible range for its unit
    UnreasonableValue,
    /// No reporting year was supplied
    MissingYear,
    /// Confidence score below the configured threshold
    LowConfidence,
}

impl QualityFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFlag::UnclearUnits => "unclear_units",
            QualityFlag::UnreasonableValue => "unreasonable_value",
            QualityFlag::MissingYear => "missing_year",
            QualityFlag::LowConfidence => "low_confidence",
        }
    }
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity bucket derived deterministically from a record's quality flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// No quality flags raised
    Valid,
    /// Flags raised, none of them `unreasonable_value`
    Warning,
    /// `unreasonable_value` present
    Error,
}

impl ValidationStatus {
    /// Derive the status from a freshly recomputed flag set.
    ///
    /// `error` iff `unreasonable_value` is present; `warning` iff the set is
    /// non-empty otherwise; `valid` when the set is empty.
    pub fn from_flags(flags: &[QualityFlag]) -> Self {
        if flags.contains(&QualityFlag::UnreasonableValue) {
            ValidationStatus::Error
        } else if !flags.is_empty() {
            ValidationStatus::Warning
        } else {
            ValidationStatus::Valid
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Warning => "warning",
            ValidationStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// A single extracted ESG metric instance.
///
/// Produced as an unvalidated candidate by the upstream extraction adapter;
/// the enhancement pipeline fills in the confidence and validation fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KpiRecord {
    /// Free-text metric label, e.g. "Total GHG Emissions Scope 1 & 2"
    #[serde(default)]
    pub name: String,
    /// Reported value as text, may embed a number and unit
    #[serde(default)]
    pub value: String,
    /// Unit/category descriptor, e.g. "percentage", "tCO2e"
    #[serde(default)]
    pub metric_type: String,
    /// Reporting year, when the source text stated one
    #[serde(default)]
    pub year: Option<i32>,
    /// Source excerpt supporting the record
    #[serde(default)]
    pub reference: String,
    /// ESG pillar the record was extracted under; enhancement falls back to
    /// a configured default when the boundary supplied none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<EsgPillar>,
    /// 0-100 extraction reliability estimate, computed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<u8>,
    /// Explanation generated alongside the score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_reasoning: Option<String>,
    /// Validation concerns, recomputed from scratch on every enhancement pass
    #[serde(default)]
    pub quality_flags: Vec<QualityFlag>,
    /// Derived severity bucket, set by enhancement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<ValidationStatus>,
}

/// Aggregated statistics for a processed batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchMetadata {
    pub total_metrics_found: usize,
    /// Mean confidence score, rounded to one decimal place
    pub average_confidence: f64,
    /// Count of records with `validation_status == error`
    pub validation_errors: usize,
    /// Count of records with `validation_status == warning`
    pub warnings: usize,
    pub processing_notes: String,
}

/// Result of comparing a metric value against an industry reference value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkComparison {
    pub benchmark: Option<f64>,
    pub difference: Option<f64>,
    pub is_outlier: bool,
    pub note: String,
}
