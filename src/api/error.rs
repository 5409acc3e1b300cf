use std::fmt;

/// Failure talking to the remote course/record service.
#[derive(Debug)]
pub enum ApiError {
    Transport(reqwest::Error),
    Status { status: u16, endpoint: String },
    Decode { endpoint: String, message: String },
    InvalidUrl(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "Request failed: {e}"),
            ApiError::Status { status, endpoint } => write!(f, "{endpoint} returned HTTP {status}"),
            ApiError::Decode { endpoint, message } => write!(f, "Unexpected response from {endpoint}: {message}"),
            ApiError::InvalidUrl(e) => write!(f, "Invalid service URL: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

impl ApiError {
    /// HTTP status reported by the remote service, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
