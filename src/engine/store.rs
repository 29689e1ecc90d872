#[cfg(test)]
use mockall::automock;

use crate::domain::PaymentError;
use crate::domain::PaymentId;
use crate::domain::PaymentOutcome;

/// Append-only collection of payment outcomes. There is no update or delete.
#[cfg_attr(test, automock)]
pub trait PaymentStore {
    fn insert(&self, outcome: PaymentOutcome) -> Result<(), PaymentError>;
    /// Exact match lookup. A miss is `Ok(None)`, not an error.
    fn get(&self, id: &PaymentId) -> Result<Option<PaymentOutcome>, PaymentError>;
    /// Every stored outcome in insertion order.
    fn list_all(&self) -> Result<Vec<PaymentOutcome>, PaymentError>;
}
