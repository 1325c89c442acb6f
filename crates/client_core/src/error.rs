use thiserror::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error(
        "server returned status {status}: {}",
        .message.as_deref().unwrap_or("no message")
    )]
    Status { status: u16, message: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid product id {0:?}")]
    InvalidId(String),
}

impl ClientError {
    /// Human-readable message supplied by the server, if the error body had one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
