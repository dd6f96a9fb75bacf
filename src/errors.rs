use thiserror::Error;

/// Failure of a single call to the external score API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered 401; the local session must be dropped.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status, with the API's error text when it sent one.
    #[error("API error: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Message the API itself supplied, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}
