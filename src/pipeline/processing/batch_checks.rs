//! Cross-record checks that require the full batch materialized: duplicate
//! detection, temporal consistency, statistical outliers, and unit/year
//! consistency. All checks are read-only over the batch and report either
//! indices into the caller's original sequence or warning strings.

use std::collections::{HashMap, HashSet};

use crate::domain::KpiRecord;

/// Default z-score threshold for outlier detection.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 2.5;

/// Warning emitted when a batch spans suspiciously many reporting years.
pub const TEMPORAL_WARNING: &str =
    "Multiple reporting years detected - verify temporal consistency";

fn duplicate_key(record: &KpiRecord) -> (String, Option<i32>) {
    (record.name.to_lowercase(), record.year)
}

/// Indices of records that repeat an earlier record's (name, year) pair.
///
/// The first occurrence of a key is the original; every later occurrence is
/// reported, in encounter order. Names compare case-insensitively, and a
/// missing name still participates as the empty-string key.
pub fn detect_duplicates(records: &[KpiRecord]) -> Vec<usize> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for (i, record) in records.iter().enumerate() {
        if !seen.insert(duplicate_key(record)) {
            duplicates.push(i);
        }
    }

    duplicates
}

/// Record-mode variant of [`detect_duplicates`], returning the duplicate
/// records themselves.
pub fn detect_duplicate_metrics(records: &[KpiRecord]) -> Vec<KpiRecord> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for record in records {
        if !seen.insert(duplicate_key(record)) {
            duplicates.push(record.clone());
        }
    }

    duplicates
}

/// Batch-level temporal sanity check.
///
/// Emits exactly one warning when more than three distinct reporting years
/// appear across the batch, otherwise nothing.
pub fn check_temporal_consistency(records: &[KpiRecord]) -> Vec<String> {
    let distinct_years: HashSet<i32> = records.iter().filter_map(|r| r.year).collect();

    if distinct_years.len() > 3 {
        vec![TEMPORAL_WARNING.to_string()]
    } else {
        Vec::new()
    }
}

/// Indices of records whose value is a statistical outlier within the batch.
///
/// Values that fail to parse as a number are treated as 0.0 rather than
/// excluded. Uses population mean and standard deviation; a zero deviation is
/// substituted with 1, so an all-equal batch never flags anything.
pub fn detect_outliers(records: &[KpiRecord], threshold: f64) -> Vec<usize> {
    if records.is_empty() {
        return Vec::new();
    }

    let values: Vec<f64> = records
        .iter()
        .map(|r| r.value.trim().parse::<f64>().unwrap_or(0.0))
        .collect();

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let mut std_dev = variance.sqrt();
    if std_dev == 0.0 {
        std_dev = 1.0;
    }

    values
        .iter()
        .enumerate()
        .filter(|(_, v)| ((**v - mean) / std_dev).abs() > threshold)
        .map(|(i, _)| i)
        .collect()
}

/// Pick the most frequent key, breaking ties toward the earliest first
/// occurrence so the result is deterministic.
fn mode_key<K: Eq + std::hash::Hash + Clone>(keys: impl Iterator<Item = K>) -> Option<K> {
    let mut counts: HashMap<K, (usize, usize)> = HashMap::new();
    for (i, key) in keys.enumerate() {
        let entry = counts.entry(key).or_insert((0, i));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(key, _)| key)
}

/// Indices of records whose unit descriptor differs from the batch's most
/// common one (case-insensitive).
pub fn check_unit_consistency(records: &[KpiRecord]) -> Vec<usize> {
    let Some(most_common) = mode_key(records.iter().map(|r| r.metric_type.to_lowercase())) else {
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.metric_type.to_lowercase() != most_common)
        .map(|(i, _)| i)
        .collect()
}

/// Indices of records whose reporting year differs from the batch's most
/// common year. Records without a year are neither counted nor flagged.
pub fn check_year_consistency(records: &[KpiRecord]) -> Vec<usize> {
    let Some(most_common) = mode_key(records.iter().filter_map(|r| r.year)) else {
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches!(r.year, Some(y) if y != most_common))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, value: &str, metric_type: &str, year: Option<i32>) -> KpiRecord {
        KpiRecord {
            name: name.to_string(),
            value: value.to_string(),
            metric_type: metric_type.to_string(),
            year,
            ..Default::default()
        }
    }

    #[test]
    fn duplicates_match_case_insensitively_on_name_and_year() {
        let records = vec![
            record("CO2", "1", "tons", Some(2023)),
            record("co2", "1", "tons", Some(2023)),
            record("CO2", "1", "tons", Some(2022)),
        ];
        assert_eq!(detect_duplicates(&records), vec![1]);
    }

    #[test]
    fn duplicates_are_reported_in_encounter_order() {
        let records = vec![
            record("A", "1", "tons", Some(2023)),
            record("B", "1", "tons", Some(2023)),
            record("a", "1", "tons", Some(2023)),
            record("b", "1", "tons", Some(2023)),
        ];
        assert_eq!(detect_duplicates(&records), vec![2, 3]);
    }

    #[test]
    fn missing_names_still_collide() {
        let records = vec![
            record("", "1", "tons", Some(2023)),
            record("", "2", "tons", Some(2023)),
        ];
        assert_eq!(detect_duplicates(&records), vec![1]);
    }

    #[test]
    fn record_mode_returns_the_duplicate_records() {
        let records = vec![
            record("CO2", "1", "tons", Some(2023)),
            record("co2", "2", "tons", Some(2023)),
        ];
        let dupes = detect_duplicate_metrics(&records);
        assert_eq!(dupes.len(), 1);
        assert_eq!(dupes[0].value, "2");
    }

    #[test]
    fn four_distinct_years_emit_one_warning() {
        let records = vec![
            record("A", "1", "tons", Some(2020)),
            record("B", "1", "tons", Some(2021)),
            record("C", "1", "tons", Some(2022)),
            record("D", "1", "tons", Some(2023)),
        ];
        let warnings = check_temporal_consistency(&records);
        assert_eq!(warnings, vec![TEMPORAL_WARNING.to_string()]);
    }

    #[test]
    fn three_distinct_years_emit_nothing() {
        let records = vec![
            record("A", "1", "tons", Some(2021)),
            record("B", "1", "tons", Some(2022)),
            record("C", "1", "tons", Some(2023)),
            record("D", "1", "tons", Some(2023)),
            record("E", "1", "tons", None),
        ];
        assert!(check_temporal_consistency(&records).is_empty());
    }

    #[test]
    fn outlier_detection_flags_the_extreme_value() {
        // Ten 10s and one 1000: the spike sits at z = sqrt(10) ~ 3.16
        let mut records: Vec<KpiRecord> = (0..10)
            .map(|i| record(&format!("M{}", i), "10", "tons", None))
            .collect();
        records.push(record("Spike", "1000", "tons", None));
        assert_eq!(
            detect_outliers(&records, DEFAULT_OUTLIER_THRESHOLD),
            vec![10]
        );
    }

    #[test]
    fn extreme_value_at_z_of_two_is_not_flagged() {
        // With population sigma, 1000 against four 10s lands at exactly
        // z = 2.0, below the 2.5 threshold
        let records = vec![
            record("A", "10", "tons", None),
            record("B", "10", "tons", None),
            record("C", "10", "tons", None),
            record("D", "10", "tons", None),
            record("E", "1000", "tons", None),
        ];
        assert!(detect_outliers(&records, DEFAULT_OUTLIER_THRESHOLD).is_empty());
        // A lower threshold does flag it
        assert_eq!(detect_outliers(&records, 1.5), vec![4]);
    }

    #[test]
    fn all_equal_batch_has_no_outliers() {
        let records = vec![
            record("A", "5", "tons", None),
            record("B", "5", "tons", None),
            record("C", "5", "tons", None),
        ];
        assert!(detect_outliers(&records, DEFAULT_OUTLIER_THRESHOLD).is_empty());
    }

    #[test]
    fn unparseable_values_count_as_zero() {
        // Ten unparseable values become ten zeros, so the lone numeric
        // value is the outlier (z ~ 3.16)
        let mut records: Vec<KpiRecord> = (0..10)
            .map(|i| record(&format!("M{}", i), "not a number", "tons", None))
            .collect();
        records.push(record("Spike", "500", "tons", None));
        assert_eq!(
            detect_outliers(&records, DEFAULT_OUTLIER_THRESHOLD),
            vec![10]
        );
    }

    #[test]
    fn empty_batch_has_no_outliers() {
        assert!(detect_outliers(&[], DEFAULT_OUTLIER_THRESHOLD).is_empty());
    }

    #[test]
    fn unit_consistency_flags_the_odd_unit_out() {
        let records = vec![
            record("A", "1", "percentage", None),
            record("B", "2", "Percentage", None),
            record("C", "3", "tCO2e", None),
        ];
        assert_eq!(check_unit_consistency(&records), vec![2]);
    }

    #[test]
    fn year_consistency_ignores_missing_years() {
        let records = vec![
            record("A", "1", "tons", Some(2023)),
            record("B", "2", "tons", Some(2023)),
            record("C", "3", "tons", Some(2019)),
            record("D", "4", "tons", None),
        ];
        assert_eq!(check_year_consistency(&records), vec![2]);
    }

    #[test]
    fn consistency_checks_handle_empty_batches() {
        assert!(check_unit_consistency(&[]).is_empty());
        assert!(check_year_consistency(&[]).is_empty());
    }
}
