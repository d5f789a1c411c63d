//! Unit and range validation for extracted KPI records.
//!
//! Both validators are data-driven: the unit allow-lists and value ranges are
//! plain tables matched by case-insensitive substring search, so the rules can
//! be tested independently of the matching code.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::EsgPillar;

/// Unit tokens considered plausible for each ESG pillar.
const ENVIRONMENTAL_UNITS: &[&str] = &[
    "metric tons",
    "tCO2e",
    "kgCO2e",
    "percentage",
    "%",
    "MWh",
    "kWh",
    "liters",
    "cubic meters",
    "tons",
    "kg",
    "g",
];

const SOCIAL_UNITS: &[&str] = &[
    "percentage",
    "%",
    "count",
    "number",
    "hours",
    "days",
    "employees",
    "people",
    "persons",
];

const GOVERNANCE_UNITS: &[&str] = &[
    "percentage",
    "%",
    "count",
    "number",
    "ratio",
    "members",
    "directors",
];

/// Plausible value ranges keyed by unit token, checked in order; the first
/// token found in the metric type wins.
const VALUE_RANGES: &[(&str, f64, f64)] = &[
    ("percentage", 0.0, 100.0),
    ("metric tons", 0.0, 1_000_000.0),
    ("tCO2e", 0.0, 1_000_000.0),
    ("kgCO2e", 0.0, 1_000_000.0),
    ("tons", 0.0, 1_000_000.0),
    ("kg", 0.0, 1_000_000.0),
    ("employees", 0.0, 1_000_000.0),
    ("count", 0.0, 1_000_000.0),
];

/// First contiguous numeric run in a value string. Matches "50" in "50,000":
/// the comma is deliberately outside the character class to preserve the
/// extraction behavior the rest of the pipeline is calibrated against.
static NUMERIC_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+(\.[0-9]+)?").unwrap());

fn allowed_units(pillar: EsgPillar) -> &'static [&'static str] {
    match pillar {
        EsgPillar::Environmental => ENVIRONMENTAL_UNITS,
        EsgPillar::Social => SOCIAL_UNITS,
        EsgPillar::Governance => GOVERNANCE_UNITS,
    }
}

/// Check whether a metric's declared unit is plausible for its pillar.
///
/// True iff `metric_type` contains at least one allow-listed token for the
/// pillar, compared case-insensitively.
pub fn validate_units(metric_type: &str, pillar: EsgPillar) -> bool {
    let haystack = metric_type.to_lowercase();
    allowed_units(pillar)
        .iter()
        .any(|unit| haystack.contains(&unit.to_lowercase()))
}

/// Check whether a reported value is within a plausible range for its unit.
///
/// Fail-open: non-numeric values, unrecognized units, and unparseable numbers
/// are all treated as valid. Only a parsed number outside the range of the
/// first matching unit token fails.
pub fn validate_range(value: &str, metric_type: &str) -> bool {
    let Some(m) = NUMERIC_RUN.find(value) else {
        return true; // Non-numeric values are valid
    };
    let Ok(numeric_value) = m.as_str().parse::<f64>() else {
        return true;
    };

    let unit_lower = metric_type.to_lowercase();
    for (unit, min_val, max_val) in VALUE_RANGES {
        if unit_lower.contains(&unit.to_lowercase()) {
            return *min_val <= numeric_value && numeric_value <= *max_val;
        }
    }

    true // No range defined for this unit
}
