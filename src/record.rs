use std::collections::HashMap;

use serde::Serialize;

use crate::constants;

/// Fixed-shape enriched record handed to the encoder. Field names match the
/// wire contract existing consumers depend on (`counterType` in particular).
/// Constructed fresh per matching sample and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedRecord {
    /// Seconds since epoch; which clock it comes from depends on the recipe
    /// (backend-resolved for cpu/network, sample-derived for memory).
    pub timestamp: i64,
    pub value: f64,
    /// The recognized metric name that selected the recipe.
    pub metric: String,
    /// Logical pod identifier used for the external lookups.
    pub endpoint: String,
    /// Pod IP resolved from the metadata service; may be empty.
    pub ip: String,
    /// The full original label map of the series.
    pub tags: HashMap<String, String>,
    #[serde(rename = "counterType")]
    pub counter_type: &'static str,
    pub application: &'static str,
    pub step: i64,
}

impl EnrichedRecord {
    pub fn new(
        timestamp: i64,
        value: f64,
        metric: &str,
        endpoint: &str,
        ip: String,
        tags: HashMap<String, String>,
    ) -> Self {
        Self {
            timestamp,
            value,
            metric: metric.to_string(),
            endpoint: endpoint.to_string(),
            ip,
            tags,
            counter_type: constants::COUNTER_TYPE,
            application: constants::APPLICATION,
            step: constants::STEP,
        }
    }
}
