//! Error types for the streaming pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Boxed cause carried by errors that wrap an SDK failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Broad class of an [`Error`], used by callers that only care about the stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Fetch,
    Decode,
    Encode,
    Publish,
}

/// Why an object could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    NotFound,
    AccessDenied,
    Other,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("object not found"),
            Self::AccessDenied => f.write_str("access denied"),
            Self::Other => f.write_str("request failed"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid process setting. Only raised at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch s3://{bucket}/{key}: {kind}")]
    Fetch {
        kind: FetchErrorKind,
        bucket: String,
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to decompress log file: {0}")]
    Decompress(#[source] std::io::Error),

    #[error("Failed to decode log file: {0}")]
    Decode(#[source] serde_json::Error),

    /// A single record could not be re-encoded. The publisher recovers from this one.
    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to put records to stream {stream}: {source}")]
    Publish {
        stream: String,
        #[source]
        source: BoxError,
    },

    #[error("Stream {stream} rejected {failed} of {total} records (first error: {first_error})")]
    PartialPublish {
        stream: String,
        failed: usize,
        total: usize,
        first_error: String,
    },
}

impl Error {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Fetch { .. } => ErrorKind::Fetch,
            Self::Decompress(_) | Self::Decode(_) => ErrorKind::Decode,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Publish { .. } | Self::PartialPublish { .. } => ErrorKind::Publish,
        }
    }
}
