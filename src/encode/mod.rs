use std::path::PathBuf;

use crate::error::Result;
use crate::record::EnrichedRecord;

pub mod schema;

pub use schema::SchemaJsonEncoder;

/// Marshals a finished record into the bytes handed to the publisher.
pub trait Encoder: Send + Sync {
    fn encode(&self, record: &EnrichedRecord) -> Result<Vec<u8>>;
}

/// Plain JSON encoding; lossless for every logical field.
pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn encode(&self, record: &EnrichedRecord) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(record)?)
    }
}

/// Encoder selection, fixed at construction time from configuration.
#[derive(Debug, Clone)]
pub enum EncoderConfig {
    Json,
    SchemaJson { schema_path: PathBuf },
}

impl EncoderConfig {
    pub fn build(&self) -> Result<Box<dyn Encoder>> {
        match self {
            EncoderConfig::Json => Ok(Box::new(JsonEncoder)),
            EncoderConfig::SchemaJson { schema_path } => {
                Ok(Box::new(SchemaJsonEncoder::from_file(schema_path)?))
            }
        }
    }
}
