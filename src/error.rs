use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Server rejected request ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the blocking notification. A server-provided message wins,
    /// then `rejected` for rejections without one, then `failed` for
    /// transport and decode failures.
    pub fn user_message(&self, rejected: &str, failed: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Rejected { .. } => rejected.to_string(),
            ApiError::Network(_) | ApiError::Decode(_) => failed.to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum FormError {
    #[error("Title is required.")]
    MissingTitle,
    #[error("Please choose a category.")]
    MissingCategory,
    #[error("Date is required.")]
    MissingDate,
    #[error("Amount must be a non-negative number.")]
    InvalidAmount,
}
