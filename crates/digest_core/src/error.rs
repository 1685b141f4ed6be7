use thiserror::Error;

/// How a failure should be presented to the reader of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network unreachable or a non-2xx status.
    Transport,
    /// Well-formed response carrying `success: false`.
    Application,
    /// Body could not be read as the expected shape.
    MalformedResponse,
    /// Anything raised outside the request path.
    Other,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{0}")]
    Application(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Io(_) | Error::Http(_) | Error::Transport(_) => FailureKind::Transport,
            Error::Application(_) => FailureKind::Application,
            Error::Serialization(_) | Error::MalformedResponse(_) => FailureKind::MalformedResponse,
            _ => FailureKind::Other,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
