use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error};

use crate::constants;
use crate::encode::Encoder;
use crate::error::Result;
use crate::gateway::{MetadataStore, MetricsBackend, Resource};
use crate::numeric::round2;
use crate::record::EnrichedRecord;
use crate::wire::{labels_to_map, Sample, WriteRequest};

pub mod endpoint;

use endpoint::resolve_endpoint;

/// The four metric kinds the enricher recognizes. Dispatch is by tagged
/// variant rather than chained string comparisons so adding a recipe means
/// adding a variant, not another branch of an if-ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    CpuUsage,
    MemoryUsage,
    NetworkReceive,
    NetworkTransmit,
}

impl MetricKind {
    /// Maps a series' `__name__` to a recipe; anything else is dropped
    /// without touching the external collaborators.
    pub fn classify(name: &str) -> Option<Self> {
        match name {
            constants::CPU_USAGE => Some(Self::CpuUsage),
            constants::MEMORY_USAGE => Some(Self::MemoryUsage),
            constants::NETWORK_RECEIVE => Some(Self::NetworkReceive),
            constants::NETWORK_TRANSMIT => Some(Self::NetworkTransmit),
            _ => None,
        }
    }

    /// CPU and memory recipes skip the pause-container sentinel; the network
    /// recipes filter on namespace only.
    fn excludes_pod_sentinel(self) -> bool {
        matches!(self, Self::CpuUsage | Self::MemoryUsage)
    }
}

/// The metric classifier and enricher. Owns the gateway ports, the encoder,
/// and the target namespace; stateless across batches.
pub struct Enricher {
    metadata: Arc<dyn MetadataStore>,
    backend: Arc<dyn MetricsBackend>,
    encoder: Box<dyn Encoder>,
    namespace: String,
}

impl Enricher {
    pub fn new(
        metadata: Arc<dyn MetadataStore>,
        backend: Arc<dyn MetricsBackend>,
        encoder: Box<dyn Encoder>,
        namespace: &str,
    ) -> Self {
        Self {
            metadata,
            backend,
            encoder,
            namespace: namespace.to_string(),
        }
    }

    /// Runs one batch: at most one encoded record per input sample, in
    /// series order then sample order within each series.
    ///
    /// A gateway or quota-parse error aborts the whole invocation with no
    /// partial output; it almost certainly means the metadata or query
    /// service is down, so the remaining samples would fail the same way.
    /// A schema-encode failure drops only that record and continues.
    pub async fn serialize_batch(&self, request: &WriteRequest) -> Result<Vec<Vec<u8>>> {
        let mut out = Vec::new();
        for series in &request.timeseries {
            let labels = labels_to_map(&series.labels);
            for sample in &series.samples {
                let record = match self.enrich_sample(&labels, sample).await? {
                    Some(record) => record,
                    None => continue,
                };
                match self.encoder.encode(&record) {
                    Ok(bytes) => out.push(bytes),
                    Err(err) => {
                        error!(metric = %record.metric, error = %err,
                            "couldn't marshal enriched record, dropping it");
                    }
                }
            }
        }
        Ok(out)
    }

    /// Applies the namespace and sentinel filters, then dispatches to the
    /// matching recipe. `None` means the sample was filtered out or did not
    /// match a recognized metric.
    async fn enrich_sample(
        &self,
        labels: &HashMap<String, String>,
        sample: &Sample,
    ) -> Result<Option<EnrichedRecord>> {
        let name = labels
            .get(constants::LABEL_NAME)
            .map(String::as_str)
            .unwrap_or_default();
        let kind = match MetricKind::classify(name) {
            Some(kind) => kind,
            None => return Ok(None),
        };

        if labels.get(constants::LABEL_NAMESPACE).map(String::as_str)
            != Some(self.namespace.as_str())
        {
            return Ok(None);
        }
        let container = labels
            .get(constants::LABEL_CONTAINER)
            .map(String::as_str)
            .unwrap_or_default();
        if kind.excludes_pod_sentinel() && container == constants::POD_SENTINEL {
            debug!(%name, "skipping pause-container sample");
            return Ok(None);
        }

        let endpoint = resolve_endpoint(labels);
        let pod = self
            .metadata
            .resolve_pod_identity(&self.namespace, &endpoint)
            .await?;

        let record = match kind {
            MetricKind::CpuUsage => {
                let (timestamp, usage) =
                    self.backend.cpu_usage(&endpoint, sample.timestamp).await?;
                let requested = self
                    .metadata
                    .resolve_quota(&self.namespace, container, Resource::Cpu)
                    .await?;
                EnrichedRecord::new(
                    timestamp,
                    round2(usage / requested * 100.0),
                    name,
                    &endpoint,
                    pod.ip,
                    labels.clone(),
                )
            }
            MetricKind::MemoryUsage => {
                let requested = self
                    .metadata
                    .resolve_quota(&self.namespace, container, Resource::Memory)
                    .await?;
                EnrichedRecord::new(
                    sample.timestamp / 1000,
                    round2(sample.value / requested * 100.0),
                    name,
                    &endpoint,
                    pod.ip,
                    labels.clone(),
                )
            }
            MetricKind::NetworkReceive | MetricKind::NetworkTransmit => {
                let (timestamp, value) = self
                    .backend
                    .network_usage(&endpoint, sample.timestamp, name)
                    .await?;
                EnrichedRecord::new(timestamp, value, name, &endpoint, pod.ip, labels.clone())
            }
        };
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::MetricKind;

    #[test]
    fn classifies_the_four_recognized_names() {
        assert_eq!(
            MetricKind::classify("container_cpu_usage_seconds_total"),
            Some(MetricKind::CpuUsage)
        );
        assert_eq!(
            MetricKind::classify("container_memory_usage_bytes"),
            Some(MetricKind::MemoryUsage)
        );
        assert_eq!(
            MetricKind::classify("container_network_receive_bytes_total"),
            Some(MetricKind::NetworkReceive)
        );
        assert_eq!(
            MetricKind::classify("container_network_transmit_bytes_total"),
            Some(MetricKind::NetworkTransmit)
        );
        assert_eq!(MetricKind::classify("node_load1"), None);
        assert_eq!(MetricKind::classify(""), None);
    }
}
