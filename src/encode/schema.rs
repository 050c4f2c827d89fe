use std::fs;
use std::path::Path;

use jsonschema::JSONSchema;

use super::Encoder;
use crate::error::{EnrichError, Result};
use crate::record::EnrichedRecord;

/// JSON encoder that validates every record against a schema compiled once
/// at construction. Construction fails if the schema file is missing or is
/// not a valid JSON Schema; a per-record validation failure is an `Encode`
/// error the pipeline logs and skips.
pub struct SchemaJsonEncoder {
    schema: JSONSchema,
}

impl SchemaJsonEncoder {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let document: serde_json::Value = serde_json::from_str(&raw)?;
        // The compiled schema borrows the document for its lifetime.
        let document: &'static serde_json::Value = Box::leak(Box::new(document));
        let schema = JSONSchema::options().compile(document).map_err(|err| {
            EnrichError::Config(format!("invalid schema '{}': {}", path.display(), err))
        })?;
        Ok(Self { schema })
    }
}

impl Encoder for SchemaJsonEncoder {
    fn encode(&self, record: &EnrichedRecord) -> Result<Vec<u8>> {
        let value = serde_json::to_value(record)?;
        if let Err(errors) = self.schema.validate(&value) {
            let detail = errors
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(EnrichError::Encode(detail));
        }
        Ok(serde_json::to_vec(&value)?)
    }
}
