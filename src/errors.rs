use thiserror::Error;

/// Crate-wide error type. Everything the dispatch path can fail with is
/// collapsed here so the caller decides once whether to keep or discard
/// the turn.
#[derive(Debug, Error)]
pub enum ColloquyError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("api error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ColloquyError {
    pub fn api_error(msg: impl Into<String>) -> Self {
        ColloquyError::Api(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        ColloquyError::Config(msg.into())
    }

    /// True for the credential short-circuit, which is surfaced as a
    /// warning rather than an error notice.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, ColloquyError::MissingCredential)
    }
}

pub type ColloquyResult<T> = Result<T, ColloquyError>;
