use std::time::Duration;

use async_trait::async_trait;

use super::{MetadataStore, PodInfo, Resource};
use crate::error::{EnrichError, Result};

/// Client for the k8s-watch pod-metadata service. The service takes a POST
/// whose body is the raw identifier and answers with
/// `{"pod_ip": ..., "pod_name": ...}`; quota lookups reuse the same endpoint
/// and deliver the value in the `pod_ip` field.
pub struct K8sWatchClient {
    client: reqwest::Client,
    url: String,
}

impl K8sWatchClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    async fn lookup(&self, name: &str) -> Result<PodInfo> {
        let response = self
            .client
            .post(&self.url)
            .body(name.to_string())
            .send()
            .await?;
        let info = response.json::<PodInfo>().await?;
        Ok(info)
    }
}

#[async_trait]
impl MetadataStore for K8sWatchClient {
    async fn resolve_pod_identity(&self, _namespace: &str, endpoint: &str) -> Result<PodInfo> {
        self.lookup(endpoint).await
    }

    async fn resolve_quota(
        &self,
        _namespace: &str,
        container: &str,
        resource: Resource,
    ) -> Result<f64> {
        let key = resource.quota_key(container);
        let info = self.lookup(&key).await?;
        info.ip
            .parse::<f64>()
            .map_err(|_| EnrichError::QuotaParse {
                key,
                value: info.ip,
            })
    }
}
