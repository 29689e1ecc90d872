use std::sync::PoisonError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Malformed card number - {0}")]
    MalformedCardNumber(String),
    #[error("Invalid payment payload - {0}")]
    InvalidPayload(String),
    #[error("Error parsing CSV file - {0}")]
    CSVError(#[from] csv::Error),
    #[error("IO error - {0}")]
    IOError(#[from] std::io::Error),
    #[error("Error serializing payment result - {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Error synchronizing payment store - {0}")]
    SyncError(String),
}

impl PaymentError {
    /// Whether the caller sent something the gateway cannot process, as
    /// opposed to a failure of the gateway itself.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            PaymentError::MalformedCardNumber(_) | PaymentError::InvalidPayload(_)
        )
    }
}

impl<T> From<PoisonError<T>> for PaymentError {
    fn from(err: PoisonError<T>) -> Self {
        PaymentError::SyncError(err.to_string())
    }
}
