use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("TMDb API key not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TMDb returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse TMDb response for {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No results: {0}")]
    NoResults(String),
}

