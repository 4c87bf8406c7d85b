//! Error Types
//!
//! Every failure the category screen can surface to the user.

use thiserror::Error;

/// Message shown when the backend gives no usable explanation.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Backend answered with a non-success status
    #[error("Request failed with status {status}")]
    Request { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A create/update/delete from this screen has not settled yet
    #[error("Another change is still being saved")]
    MutationInFlight,
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    /// Text for a transient notification.
    ///
    /// Server-provided messages win; transport and decoding failures collapse
    /// into the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Validation(msg) => msg.clone(),
            CatalogError::Request { message: Some(msg), .. } if !msg.trim().is_empty() => msg.clone(),
            CatalogError::MutationInFlight => self.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn is_validation(&self) -> bool {
        matches!(self, CatalogError::Validation(_))
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
