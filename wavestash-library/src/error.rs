use thiserror::Error;
use wavestash_riff::WaveError;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// The upload could not be parsed as a WAVE file.
    #[error("{0}")]
    Rejected(#[from] WaveError),

    /// The file parsed, but its format leaves the runtime undefined.
    #[error("format chunk has no usable {field}")]
    DegenerateFormat { field: &'static str },

    #[error("no such file found: {0}")]
    NotFound(String),

    #[error("invalid value {value:?} for query option {key}")]
    InvalidQuery { key: String, value: String },

    /// Anything else. The cause is kept for logging but never shown to clients.
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LibraryError {
    /// Whether the request itself was at fault (4xx-style) rather than the service (5xx-style).
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Rejected(error) => error.is_malformed_input(),
            Self::DegenerateFormat { .. } | Self::NotFound(_) | Self::InvalidQuery { .. } => true,
            Self::Internal(_) => false,
        }
    }

    pub fn internal(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Box::new(error))
    }
}
