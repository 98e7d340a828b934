//! Payment Error Types

use sponsor_core::ClientError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The widget declined the card; the message is shown verbatim
    #[error("Card error: {0}")]
    Card(String),

    /// The widget could not be set up
    #[error("Widget error: {0}")]
    Widget(String),

    /// Rendered order total could not be converted to cents
    #[error("Invalid order total")]
    InvalidTotal,

    /// Backend call failed
    #[error("Backend error: {0}")]
    Backend(#[from] ClientError),
}

impl PaymentError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Card(msg) => msg.clone(),
            Self::Widget(_) => "The payment form could not be loaded. Please refresh the page.".into(),
            Self::InvalidTotal => "The order total could not be read. Please refresh the page.".into(),
            Self::Backend(err) => err.user_message(),
        }
    }
}
