use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("protobuf decode failed: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("quota value for '{key}' is not a number: '{value}'")]
    QuotaParse { key: String, value: String },

    #[error("metrics query failed: {0}")]
    Gateway(String),

    #[error("record failed schema validation: {0}")]
    Encode(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EnrichError>;
