use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::encode::EncoderConfig;
use crate::error::{EnrichError, Result};

/// Runtime configuration. Every flag falls back to an environment variable,
/// matching how the service is configured when deployed in-cluster.
#[derive(Debug, Parser)]
#[command(name = "metrics-enricher")]
#[command(about = "Enriches remote-write container metrics with pod metadata and resource requests")]
pub struct Config {
    /// Kubernetes namespace whose container metrics are enriched
    #[arg(long, env = "ENRICH_NAMESPACE")]
    pub namespace: String,

    /// Pod-metadata (k8s-watch) service URL
    #[arg(long, env = "K8S_WATCH_URL")]
    pub k8s_watch_url: String,

    /// Metrics-query backend base URL
    #[arg(long, env = "PROMETHEUS_URL")]
    pub prometheus_url: String,

    /// Address the remote-write receive endpoint binds to
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:9201")]
    pub listen_addr: SocketAddr,

    /// Output encoding: "json" or "schema-json"
    #[arg(long, env = "SERIALIZATION_FORMAT", default_value = "json")]
    pub format: String,

    /// Schema definition file, required for the schema-json encoder
    #[arg(long, env = "SCHEMA_PATH")]
    pub schema_path: Option<PathBuf>,

    /// Timeout in seconds applied to every gateway call
    #[arg(long, env = "GATEWAY_TIMEOUT_SECS", default_value_t = 10)]
    pub gateway_timeout_secs: u64,
}

impl Config {
    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    pub fn encoder_config(&self) -> Result<EncoderConfig> {
        match self.format.as_str() {
            "json" => Ok(EncoderConfig::Json),
            "schema-json" => {
                let schema_path = self.schema_path.clone().ok_or_else(|| {
                    EnrichError::Config(
                        "the schema-json format requires --schema-path".to_string(),
                    )
                })?;
                Ok(EncoderConfig::SchemaJson { schema_path })
            }
            other => Err(EnrichError::Config(format!(
                "unknown serialization format '{}'",
                other
            ))),
        }
    }
}
