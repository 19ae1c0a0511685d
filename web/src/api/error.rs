use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Session expired")]
    Unauthorized,

    #[error("Subscription required: {message}")]
    SubscriptionRequired { message: String },

    #[error("Not found")]
    NotFound,

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Text suitable for a notice shown to the person booking.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::SubscriptionRequired { message } => message.clone(),
            ApiError::NotFound => "We couldn't find what you were looking for.".to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::InvalidConfig(_) => "The booking page is misconfigured.".to_string(),
        }
    }
}
