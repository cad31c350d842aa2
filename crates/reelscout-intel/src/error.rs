use reelscout_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntelError {
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context} returned an invalid payload: {reason}")]
    Schema { context: String, reason: String },

    #[error("profile store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing credential: {0}")]
    MissingCredential(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}
