//! Extraction boundary: sanity checks and parsing for the raw payload the
//! upstream model call produces. The payload is expected to be a JSON object
//! with `environmental` / `social` / `governance` arrays of KPI objects.

use tracing::{debug, warn};

use crate::domain::{EsgPillar, KpiRecord};
use crate::error::{PipelineError, Result};

/// Quick shape check on raw extraction output: valid JSON object containing
/// at least one of the three pillar keys. Anything else is rejected before it
/// reaches the pipeline.
pub fn validate_payload_shape(payload: &str) -> bool {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(payload) else {
        return false;
    };
    let Some(obj) = value.as_object() else {
        return false;
    };
    EsgPillar::all().iter().any(|p| obj.contains_key(p.as_str()))
}

/// Parse an extraction payload into candidate KPI records, tagging each with
/// the pillar it was listed under. Entries that are not objects are skipped
/// with a warning rather than failing the batch.
pub fn parse_payload(payload: &str) -> Result<Vec<KpiRecord>> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let Some(obj) = value.as_object() else {
        return Err(PipelineError::Payload(
            "expected a JSON object at the top level".to_string(),
        ));
    };

    if !EsgPillar::all().iter().any(|p| obj.contains_key(p.as_str())) {
        return Err(PipelineError::Payload(
            "no ESG pillar keys present".to_string(),
        ));
    }

    let mut records = Vec::new();
    for pillar in EsgPillar::all() {
        let Some(entries) = obj.get(pillar.as_str()).and_then(|v| v.as_array()) else {
            continue;
        };
        debug!("parsing {} candidates under '{}'", entries.len(), pillar);

        for entry in entries {
            match serde_json::from_value::<KpiRecord>(entry.clone()) {
                Ok(mut record) => {
                    record.pillar = Some(pillar);
                    records.push(record);
                }
                Err(e) => {
                    warn!("skipping malformed KPI entry under '{}': {}", pillar, e);
                }
            }
        }
    }

    Ok(records)
}
