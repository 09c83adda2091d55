use thiserror::Error;

/// Errors share a `Clone` bound so one refresh result can be handed to every
/// caller waiting on it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Upstream fetch error: {0}")]
    UpstreamFetch(String),

    #[error("Upstream parse error: {0}")]
    UpstreamParse(String),

    #[error("Invalid section: {0}")]
    InvalidSection(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::UpstreamParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
