use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::MetricsBackend;
use crate::constants;
use crate::error::{EnrichError, Result};

/// Instant-query response envelope (Prometheus HTTP API shape:
/// `data.result[].value` is a `[unix_seconds, "value"]` pair).
#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: QueryData,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    result: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    value: (f64, String),
}

/// Client for the metrics-query backend. CPU usage is derived from the rate
/// of the cumulative seconds counter; network counters are read as raw
/// instant values selected by metric name.
pub struct PromClient {
    client: reqwest::Client,
    base_url: String,
}

impl PromClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn instant_query(&self, query: &str, timestamp_ms: i64) -> Result<(i64, f64)> {
        let url = format!("{}/api/v1/query", self.base_url);
        let time = (timestamp_ms / 1000).to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("query", query), ("time", time.as_str())])
            .send()
            .await?;
        let body = response.json::<QueryResponse>().await?;
        let first = body
            .data
            .result
            .into_iter()
            .next()
            .ok_or_else(|| EnrichError::Gateway(format!("empty result for query '{}'", query)))?;
        let (resolved_ts, raw) = first.value;
        let value = raw.parse::<f64>().map_err(|_| {
            EnrichError::Gateway(format!("non-numeric value '{}' for query '{}'", raw, query))
        })?;
        Ok((resolved_ts as i64, value))
    }
}

#[async_trait]
impl MetricsBackend for PromClient {
    async fn cpu_usage(&self, endpoint: &str, timestamp_ms: i64) -> Result<(i64, f64)> {
        let query = format!(
            "sum(rate({}{{pod_name=\"{}\"}}[1m]))",
            constants::CPU_USAGE,
            endpoint
        );
        self.instant_query(&query, timestamp_ms).await
    }

    async fn network_usage(
        &self,
        endpoint: &str,
        timestamp_ms: i64,
        metric: &str,
    ) -> Result<(i64, f64)> {
        let query = format!("sum({}{{pod_name=\"{}\"}})", metric, endpoint);
        self.instant_query(&query, timestamp_ms).await
    }
}
