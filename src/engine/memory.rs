//! Memory implementation of the payment store.
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::RwLock;

use uuid::Uuid;

use super::PaymentStore;
use crate::domain::PaymentError;
use crate::domain::PaymentId;
use crate::domain::PaymentOutcome;
use crate::domain::PaymentStatus;

/// Id of the authorized payment seeded by [`MemoryThreadSafePaymentStore::with_demo_payments`].
pub const DEMO_PAYMENT_ID: PaymentId = Uuid::from_u128(0x33e3091a_7f72_4fa8_80e6_17a1bb80f0d0);

/// Outcomes in insertion order plus an index from id to position.
#[derive(Default)]
struct Payments {
    ordered: Vec<PaymentOutcome>,
    index: HashMap<PaymentId, usize>,
}

/// A thread-safe payment store that keeps outcomes in memory for the lifetime
/// of the process.
/// State is protected by a `RwLock` so lookups can run concurrently while
/// inserts are exclusive. Clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryThreadSafePaymentStore {
    payments: Arc<RwLock<Payments>>,
}

impl fmt::Debug for MemoryThreadSafePaymentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryThreadSafePaymentStore").finish()
    }
}

impl MemoryThreadSafePaymentStore {
    /// Creates a new, empty `MemoryThreadSafePaymentStore`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use payment_gateway_mock::MemoryThreadSafePaymentStore;
    ///
    /// let store = MemoryThreadSafePaymentStore::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `outcomes`, kept in the given order.
    pub fn with_payments(outcomes: impl IntoIterator<Item = PaymentOutcome>) -> Self {
        let mut payments = Payments::default();
        for outcome in outcomes {
            payments.index.insert(outcome.id(), payments.ordered.len());
            payments.ordered.push(outcome);
        }
        MemoryThreadSafePaymentStore {
            payments: Arc::new(RwLock::new(payments)),
        }
    }

    /// Creates a store holding one payment of each status, for demonstration.
    /// The authorized one can be fetched with [`DEMO_PAYMENT_ID`].
    pub fn with_demo_payments() -> Self {
        Self::with_payments(demo_payments())
    }
}

fn demo_payments() -> Vec<PaymentOutcome> {
    vec![
        PaymentOutcome::builder()
            .id(DEMO_PAYMENT_ID)
            .status(PaymentStatus::Authorized)
            .card_number_last_four(5678)
            .expiry_month(6)
            .expiry_year(2025)
            .currency("GBP")
            .amount(1000)
            .build(),
        PaymentOutcome::builder()
            .status(PaymentStatus::Rejected)
            .card_number_last_four(3925)
            .expiry_month(2)
            .expiry_year(2029)
            .currency("USD")
            .amount(19)
            .build(),
        PaymentOutcome::builder()
            .status(PaymentStatus::Declined)
            .card_number_last_four(4293)
            .expiry_month(9)
            .expiry_year(2032)
            .currency("EUR")
            .amount(43890)
            .build(),
    ]
}

impl PaymentStore for MemoryThreadSafePaymentStore {
    /// Appends the given outcome.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` once the outcome is stored, otherwise a `PaymentError`
    /// if the lock guarding the store was poisoned.
    fn insert(&self, outcome: PaymentOutcome) -> Result<(), PaymentError> {
        let mut payments = self.payments.write()?;
        let position = payments.ordered.len();
        debug!("Storing payment {} at position {}", outcome.id(), position);
        payments.index.insert(outcome.id(), position);
        payments.ordered.push(outcome);
        Ok(())
    }

    fn get(&self, id: &PaymentId) -> Result<Option<PaymentOutcome>, PaymentError> {
        let payments = self.payments.read()?;
        Ok(payments
            .index
            .get(id)
            .and_then(|position| payments.ordered.get(*position))
            .cloned())
    }

    fn list_all(&self) -> Result<Vec<PaymentOutcome>, PaymentError> {
        Ok(self.payments.read()?.ordered.clone())
    }
}
