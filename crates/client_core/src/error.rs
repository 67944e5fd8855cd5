use thiserror::Error;

/// Failure of a remote address-store call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("server responded with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("invalid store url: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// HTTP status of the failed response, if one arrived at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return StoreError::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => StoreError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => StoreError::Transport(err.to_string()),
        }
    }
}
