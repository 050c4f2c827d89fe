use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;

/// Downstream publication boundary. The real message-bus producer lives
/// outside this service; this port is what it plugs into.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, records: &[Vec<u8>]) -> Result<()>;
}

/// Logs each encoded record instead of producing it anywhere. Useful on its
/// own for dry runs and as the default until a producer is wired in.
pub struct LogPublisher;

#[async_trait]
impl Publisher for LogPublisher {
    async fn publish(&self, records: &[Vec<u8>]) -> Result<()> {
        for record in records {
            debug!(payload = %String::from_utf8_lossy(record), "enriched record");
        }
        info!(count = records.len(), "published enriched records");
        Ok(())
    }
}
