use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;

pub mod k8s_watch;
pub mod prom;

/// Result of a pod-metadata lookup. Either field may come back empty when
/// the upstream intentionally returns a partial record; that is not
/// distinguished from success here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PodInfo {
    #[serde(rename = "pod_ip", default)]
    pub ip: String,
    #[serde(rename = "pod_name", default)]
    pub name: String,
}

/// Requested-resource dimension for quota lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cpu,
    Memory,
}

impl Resource {
    /// Key under which the metadata service stores a container's configured
    /// resource request. This naming convention is the upstream API's; the
    /// quota is returned through the same lookup that resolves pod IPs.
    pub fn quota_key(self, container: &str) -> String {
        match self {
            Resource::Cpu => format!("{}_req_cpu", container),
            Resource::Memory => format!("{}_req_mem", container),
        }
    }
}

/// Pod-metadata service port. One physical endpoint backs both operations:
/// posting a pod name returns its identity, posting a synthesized
/// `<container>_req_*` key returns the stored quota value.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Resolves a logical endpoint to its pod identity. `namespace` is
    /// accepted for parity with the upstream API but not sent.
    async fn resolve_pod_identity(&self, namespace: &str, endpoint: &str) -> Result<PodInfo>;

    /// Resolves a container's configured resource request as a number.
    async fn resolve_quota(&self, namespace: &str, container: &str, resource: Resource)
        -> Result<f64>;
}

/// Metrics-query backend port.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Live CPU usage for `endpoint` at or near `timestamp_ms`. Returns the
    /// backend's resolved timestamp (seconds) and the usage value in cores.
    async fn cpu_usage(&self, endpoint: &str, timestamp_ms: i64) -> Result<(i64, f64)>;

    /// Current value of the named network byte counter for `endpoint`.
    async fn network_usage(
        &self,
        endpoint: &str,
        timestamp_ms: i64,
        metric: &str,
    ) -> Result<(i64, f64)>;
}
