use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Request, StatusCode};
use hyper::Body;
use prost::Message;
use tower::ServiceExt;

use metrics_enricher::encode::JsonEncoder;
use metrics_enricher::error::Result;
use metrics_enricher::gateway::{MetadataStore, MetricsBackend, PodInfo, Resource};
use metrics_enricher::pipeline::Enricher;
use metrics_enricher::publish::LogPublisher;
use metrics_enricher::server::{router, AppState};
use metrics_enricher::wire::{Label, Sample, TimeSeries, WriteRequest};

struct StaticMetadata;

#[async_trait]
impl MetadataStore for StaticMetadata {
    async fn resolve_pod_identity(&self, _namespace: &str, endpoint: &str) -> Result<PodInfo> {
        Ok(PodInfo {
            ip: "10.0.0.7".to_string(),
            name: endpoint.to_string(),
        })
    }

    async fn resolve_quota(
        &self,
        _namespace: &str,
        _container: &str,
        resource: Resource,
    ) -> Result<f64> {
        Ok(match resource {
            Resource::Cpu => 2.0,
            Resource::Memory => 1_000_000_000.0,
        })
    }
}

struct StaticBackend;

#[async_trait]
impl MetricsBackend for StaticBackend {
    async fn cpu_usage(&self, _endpoint: &str, _timestamp_ms: i64) -> Result<(i64, f64)> {
        Ok((1_700_000_123, 0.5))
    }

    async fn network_usage(
        &self,
        _endpoint: &str,
        _timestamp_ms: i64,
        _metric: &str,
    ) -> Result<(i64, f64)> {
        Ok((1_700_000_123, 1.0))
    }
}

fn app() -> axum::Router {
    let enricher = Enricher::new(
        Arc::new(StaticMetadata),
        Arc::new(StaticBackend),
        Box::new(JsonEncoder),
        "prod",
    );
    router(Arc::new(AppState {
        enricher,
        publisher: Box::new(LogPublisher),
    }))
}

fn encoded_batch() -> Vec<u8> {
    let request = WriteRequest {
        timeseries: vec![TimeSeries {
            labels: [
                ("__name__", "container_memory_usage_bytes"),
                ("namespace", "prod"),
                ("container_name", "api"),
                ("service", "kubelet"),
                ("pod_name", "api-0"),
            ]
            .iter()
            .map(|(name, value)| Label {
                name: name.to_string(),
                value: value.to_string(),
            })
            .collect(),
            samples: vec![Sample {
                value: 512_000_000.0,
                timestamp: 1_700_000_123_456,
            }],
        }],
    };
    let mut buf = Vec::new();
    request.encode(&mut buf).unwrap();
    buf
}

#[tokio::test]
async fn receive_answers_with_the_published_record_count() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/receive")
                .body(Body::from(encoded_batch()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["records"], 1);
}

#[tokio::test]
async fn undecodable_body_is_a_bad_request() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/receive")
                .body(Body::from(vec![0xff, 0xff]))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
