use std::sync::Arc;

use clap::Parser;
use tracing::info;

use metrics_enricher::config::Config;
use metrics_enricher::gateway::k8s_watch::K8sWatchClient;
use metrics_enricher::gateway::prom::PromClient;
use metrics_enricher::logging;
use metrics_enricher::pipeline::Enricher;
use metrics_enricher::publish::LogPublisher;
use metrics_enricher::server::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let _log_guard = logging::init_logging();

    let encoder = config.encoder_config()?.build()?;
    let metadata = Arc::new(K8sWatchClient::new(
        &config.k8s_watch_url,
        config.gateway_timeout(),
    )?);
    let backend = Arc::new(PromClient::new(
        &config.prometheus_url,
        config.gateway_timeout(),
    )?);
    let enricher = Enricher::new(metadata, backend, encoder, &config.namespace);

    info!(
        namespace = %config.namespace,
        format = %config.format,
        "starting metrics enricher"
    );

    let state = Arc::new(AppState {
        enricher,
        publisher: Box::new(LogPublisher),
    });
    server::run(config.listen_addr, state).await
}
