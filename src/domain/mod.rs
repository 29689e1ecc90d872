//! Module that describe domain entities, validation results and errors.
mod entities;
mod errors;
mod validation;

pub use entities::card_number_last_four;
pub use entities::PaymentId;
pub use entities::PaymentOutcome;
pub use entities::PaymentRequest;
pub use entities::PaymentStatus;
pub use entities::ProcessedPayment;
pub use entities::SupportedCurrency;
pub use errors::*;
pub use validation::ErrorReport;
pub use validation::ValidationCode;
pub use validation::ValidationReport;
pub use validation::BAD_REQUEST_STATUS;
