use std::collections::HashMap;

use crate::constants;

/// Resolves the logical endpoint identifier used for external lookups.
///
/// Kubelet-collected series carry the pod under `pod_name`, kube-state-metrics
/// series under `pod`. Any other collector (or a missing `service` label)
/// resolves to the empty string; lookups against it are still attempted and
/// fail at the gateway, which is the intended behavior.
pub fn resolve_endpoint(labels: &HashMap<String, String>) -> String {
    match labels.get(constants::LABEL_SERVICE).map(String::as_str) {
        Some(constants::SERVICE_KUBELET) => labels
            .get(constants::LABEL_POD_NAME)
            .cloned()
            .unwrap_or_default(),
        Some(constants::SERVICE_KUBE_STATE_METRICS) => labels
            .get(constants::LABEL_POD)
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    }
}
