#[derive(Debug, thiserror::Error)]
pub enum CoderankError {
    #[cfg(feature = "network")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("leaderboard request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("leaderboard error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("no leaderboard table with a `{column}` column")]
    ExtractionEmpty { column: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(String),

    #[error("bad bundled data: {0}")]
    Data(String),

    #[error("saved data failed verification: {0}")]
    Verification(String),

    #[error("{0}")]
    Other(String),
}

impl CoderankError {
    /// Errors that mean "the leaderboard could not be read this time".
    /// A refresh pass that hits one of these leaves stored data untouched and
    /// should simply be retried on the next cycle.
    pub fn is_source_unavailable(&self) -> bool {
        match self {
            #[cfg(feature = "network")]
            Self::Http(_) => true,
            Self::Timeout { .. } | Self::Api { .. } | Self::ExtractionEmpty { .. } => true,
            _ => false,
        }
    }
}

impl From<std::io::Error> for CoderankError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoderankError>;
