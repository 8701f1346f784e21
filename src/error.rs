// src/error.rs
//
// One error type for the whole ingestion run. Variants follow the failure
// classes the pipeline distinguishes: transport problems abort one source's
// loop, schema drift and handshake failures are fatal for one source, and
// geocoding failures only ever leave coordinates blank.

use thiserror::Error;

pub type Result<T, E = IngestError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// An expected raw column is missing from the whole payload.
    #[error("{school_code}: expected column '{column}' is missing; the source layout has changed")]
    SchemaDrift { school_code: String, column: String },

    #[error("session handshake with {url} failed: {reason}")]
    Handshake { url: String, reason: String },

    #[error("geocoding failed: {0}")]
    Geocode(String),

    #[error("could not decode payload as any of {tried}")]
    Decode { tried: String },

    #[error("unexpected payload from {url}: {reason}")]
    Payload { url: String, reason: String },

    #[error("export file not found: {0}")]
    MissingExport(String),

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IngestError {
    /// True for failures that mean a source can't be trusted until someone
    /// looks at it (layout changed, handshake token gone).
    pub fn is_structural(&self) -> bool {
        matches!(self, IngestError::SchemaDrift { .. } | IngestError::Handshake { .. })
    }
}
