//! Comparison of metric values against industry reference data. Invoked per
//! metric as a standalone utility, not as part of the batch pipeline.

use crate::config::BenchmarkTable;
use crate::domain::BenchmarkComparison;

/// Deviation beyond this fraction of the benchmark flags an outlier.
const OUTLIER_FRACTION: f64 = 0.5;

/// Compares metric values against an injected benchmark table.
pub struct BenchmarkComparator {
    table: BenchmarkTable,
}

impl BenchmarkComparator {
    pub fn new(table: BenchmarkTable) -> Self {
        Self { table }
    }

    /// Comparator backed by the built-in benchmark set.
    pub fn builtin() -> Self {
        Self::new(BenchmarkTable::builtin())
    }

    /// Compare a value to the industry benchmark for a metric.
    ///
    /// An unknown industry or metric yields an explicit "No benchmark
    /// available" result rather than an error.
    pub fn compare(&self, metric_name: &str, value: f64, industry: &str) -> BenchmarkComparison {
        let Some(benchmark) = self.table.get(industry, metric_name) else {
            return BenchmarkComparison {
                benchmark: None,
                difference: None,
                is_outlier: false,
                note: "No benchmark available".to_string(),
            };
        };

        let difference = value - benchmark;
        let is_outlier = difference.abs() > OUTLIER_FRACTION * benchmark;

        BenchmarkComparison {
            benchmark: Some(benchmark),
            difference: Some(difference),
            is_outlier,
            note: if is_outlier {
                "Outlier".to_string()
            } else {
                "Within expected range".to_string()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_deviation_is_flagged_as_outlier() {
        let comparator = BenchmarkComparator::builtin();
        let result = comparator.compare("emissions_intensity", 300.0, "banking");

        assert_eq!(result.benchmark, Some(150.0));
        assert_eq!(result.difference, Some(150.0));
        assert!(result.is_outlier);
        assert_eq!(result.note, "Outlier");
    }

    #[test]
    fn small_deviation_is_within_expected_range() {
        let comparator = BenchmarkComparator::builtin();
        let result = comparator.compare("renewable_energy", 50.0, "banking");

        assert_eq!(result.benchmark, Some(45.0));
        assert_eq!(result.difference, Some(5.0));
        assert!(!result.is_outlier);
        assert_eq!(result.note, "Within expected range");
    }

    #[test]
    fn deviation_below_benchmark_also_counts() {
        let comparator = BenchmarkComparator::builtin();
        let result = comparator.compare("water_intensity", 100.0, "apparel");

        assert_eq!(result.difference, Some(-400.0));
        assert!(result.is_outlier);
    }

    #[test]
    fn unknown_industry_yields_no_benchmark() {
        let comparator = BenchmarkComparator::builtin();
        let result = comparator.compare("emissions_intensity", 300.0, "mining");

        assert_eq!(result.benchmark, None);
        assert_eq!(result.difference, None);
        assert!(!result.is_outlier);
        assert_eq!(result.note, "No benchmark available");
    }

    #[test]
    fn unknown_metric_yields_no_benchmark() {
        let comparator = BenchmarkComparator::builtin();
        let result = comparator.compare("tree_count", 12.0, "banking");
        assert_eq!(result.note, "No benchmark available");
    }

    #[test]
    fn custom_table_is_respected() {
        let mut table = BenchmarkTable::new();
        table.insert("utilities", "grid_loss", 6.0);
        let comparator = BenchmarkComparator::new(table);

        let result = comparator.compare("grid_loss", 10.0, "utilities");
        assert_eq!(result.benchmark, Some(6.0));
        assert!(result.is_outlier); // |4| > 3
    }
}
