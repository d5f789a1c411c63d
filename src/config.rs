use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Read-only industry benchmark reference data: industry -> metric -> value.
///
/// Injected into the benchmark comparator rather than held as a global so
/// callers can swap in their own reference set.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkTable {
    industries: HashMap<String, HashMap<String, f64>>,
}

impl BenchmarkTable {
    /// Build an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The benchmark set shipped with the pipeline.
    pub fn builtin() -> Self {
        let mut industries = HashMap::new();

        let mut banking = HashMap::new();
        banking.insert("emissions_intensity".to_string(), 150.0); // tCO2e / EUR 1M
        banking.insert("renewable_energy".to_string(), 45.0); // %
        banking.insert("board_diversity".to_string(), 35.0); // % women
        industries.insert("banking".to_string(), banking);

        let mut apparel = HashMap::new();
        apparel.insert("water_intensity".to_string(), 500.0); // liters / garment
        apparel.insert("carbon_footprint".to_string(), 8.0); // kgCO2e / garment
        apparel.insert("recycled_materials".to_string(), 25.0); // %
        industries.insert("apparel".to_string(), apparel);

        Self { industries }
    }

    /// Load a benchmark table from a TOML file of the form:
    ///
    /// ```toml
    /// [banking]
    /// emissions_intensity = 150.0
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read benchmark file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let industries: HashMap<String, HashMap<String, f64>> = toml::from_str(&content)?;
        Ok(Self { industries })
    }

    /// Look up the reference value for a metric within an industry.
    pub fn get(&self, industry: &str, metric_name: &str) -> Option<f64> {
        self.industries
            .get(industry)
            .and_then(|metrics| metrics.get(metric_name))
            .copied()
    }

    /// Register or replace a single benchmark entry.
    pub fn insert(&mut self, industry: &str, metric_name: &str, value: f64) {
        self.industries
            .entry(industry.to_string())
            .or_default()
            .insert(metric_name.to_string(), value);
    }
}
