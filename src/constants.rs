/// Metric name constants to keep the classifier and gateway queries in sync.

// Metric names recognized by the classifier
pub const CPU_USAGE: &str = "container_cpu_usage_seconds_total";
pub const MEMORY_USAGE: &str = "container_memory_usage_bytes";
pub const NETWORK_RECEIVE: &str = "container_network_receive_bytes_total";
pub const NETWORK_TRANSMIT: &str = "container_network_transmit_bytes_total";

// Label names read from incoming series
pub const LABEL_NAME: &str = "__name__";
pub const LABEL_NAMESPACE: &str = "namespace";
pub const LABEL_CONTAINER: &str = "container_name";
pub const LABEL_SERVICE: &str = "service";
pub const LABEL_POD_NAME: &str = "pod_name";
pub const LABEL_POD: &str = "pod";

// `service` label values written by the two collectors we ingest from
pub const SERVICE_KUBELET: &str = "kubelet";
pub const SERVICE_KUBE_STATE_METRICS: &str = "kube-state-metrics";

// Pause-container sentinel excluded from cpu/memory enrichment
pub const POD_SENTINEL: &str = "POD";

// Fixed markers on every emitted record
pub const COUNTER_TYPE: &str = "GAUGE";
pub const APPLICATION: &str = "docker";
pub const STEP: i64 = 30;
