use thiserror::Error;

/// Validation errors raised while constructing domain values and snapshots.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("asset id cannot be empty")]
    EmptyAssetId,
    #[error("asset id contains a control character at index {index}")]
    AssetIdControlChar { index: usize },
    #[error("duplicate asset id '{value}' in universe")]
    DuplicateAssetId { value: String },

    #[error("timestamp must be RFC3339: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("field '{field}' cannot be blank")]
    BlankField { field: &'static str },

    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },

    #[error("invalid value '{value}' for setting '{setting}'")]
    InvalidSetting { setting: &'static str, value: String },
}

/// Top-level error type for loading and decoding universe snapshots.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read universe snapshot '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
