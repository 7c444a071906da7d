//! Error types for the ingestion path
//!
//! Comprehensive error taxonomy using thiserror. Per-record validation
//! failures are not errors: they are dropped by the transformer.

use std::fmt;
use thiserror::Error;

/// Upstream source a payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Ads,
    Crm,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Ads => write!(f, "ads"),
            SourceKind::Crm => write!(f, "crm"),
        }
    }
}

/// Top-level ingestion error
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to fetch {origin} data: {error}")]
    Fetch {
        origin: SourceKind,
        #[source]
        error: FetchError,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl IngestError {
    /// Source whose fetch or decode failed.
    pub fn source_kind(&self) -> SourceKind {
        match self {
            IngestError::Fetch { origin, .. } => *origin,
            IngestError::Decode(err) => err.origin,
        }
    }
}

/// Network or HTTP failure while retrieving a payload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("request to {url} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    #[error("received non-200 status code {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("invalid request for {url}: {reason}")]
    InvalidRequest { url: String, reason: String },

    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Payload that could not be turned into records
#[derive(Error, Debug)]
#[error("failed to decode {origin} payload: {kind}")]
pub struct DecodeError {
    pub origin: SourceKind,
    #[source]
    pub kind: DecodeErrorKind,
}

#[derive(Error, Debug)]
pub enum DecodeErrorKind {
    /// Not JSON, wrong envelope shape, or a field of the wrong type.
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Well-formed JSON without the record array at `path`.
    #[error("envelope path {path} is missing")]
    MissingEnvelope { path: &'static str },
}

impl DecodeError {
    pub fn malformed(origin: SourceKind, error: serde_json::Error) -> Self {
        Self {
            origin,
            kind: DecodeErrorKind::Malformed(error),
        }
    }

    pub fn missing_envelope(origin: SourceKind, path: &'static str) -> Self {
        Self {
            origin,
            kind: DecodeErrorKind::MissingEnvelope { path },
        }
    }

    /// True when the payload was valid JSON but carried no record array.
    pub fn is_missing_envelope(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::MissingEnvelope { .. })
    }
}
