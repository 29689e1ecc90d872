use log::{debug, info};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use super::validation::validate;
use super::Clock;
use super::PaymentStore;
use super::SystemClock;
use crate::domain::card_number_last_four;
use crate::domain::PaymentError;
use crate::domain::PaymentId;
use crate::domain::PaymentOutcome;
use crate::domain::PaymentRequest;
use crate::domain::PaymentStatus;
use crate::domain::ProcessedPayment;

#[cfg_attr(test, automock)]
pub trait PaymentProcessor {
    /// Validates and decides on a payment request. Accepted payments are stored,
    /// rejected ones are only reported back.
    fn process(&self, request: &PaymentRequest) -> Result<ProcessedPayment, PaymentError>;
    fn get(&self, id: &PaymentId) -> Result<Option<PaymentOutcome>, PaymentError>;
    fn list_all(&self) -> Result<Vec<PaymentOutcome>, PaymentError>;
}

/// Processes card payments against the validation rules and records the
/// authorized ones in the injected store.
#[derive(Debug, Clone)]
pub struct CardPaymentProcessor<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: PaymentStore> CardPaymentProcessor<S> {
    /// Creates a processor that checks expiry dates against the system date.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use payment_gateway_mock::{CardPaymentProcessor, MemoryThreadSafePaymentStore};
    ///
    /// let processor = CardPaymentProcessor::new(MemoryThreadSafePaymentStore::new());
    /// ```
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: PaymentStore, C: Clock> CardPaymentProcessor<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        CardPaymentProcessor { store, clock }
    }
}

impl<S: PaymentStore, C: Clock> PaymentProcessor for CardPaymentProcessor<S, C> {
    /// Processes the given payment request.
    ///
    /// # Returns
    ///
    /// Returns `ProcessedPayment::Accepted` when every rule passes, after the
    /// outcome has been stored, or `ProcessedPayment::Rejected` with the full
    /// error report otherwise. Fails with `PaymentError::MalformedCardNumber`
    /// when the card number of an otherwise valid request has no last four
    /// digits, and with `PaymentError::SyncError` when the store is unusable.
    fn process(&self, request: &PaymentRequest) -> Result<ProcessedPayment, PaymentError> {
        let report = validate(request, self.clock.today());

        let last_four = match card_number_last_four(request.card_number()) {
            Ok(last_four) => last_four,
            Err(e) if !report.is_empty() => {
                debug!("No last four digits for rejected {:?}: {}", request, e);
                0
            }
            // Unreachable while the card number rules hold, kept as a guard.
            Err(e) => return Err(e),
        };

        let build_outcome = |status: PaymentStatus| {
            PaymentOutcome::builder()
                .id(Uuid::new_v4())
                .status(status)
                .card_number_last_four(last_four)
                .expiry_month(request.expiry_month())
                .expiry_year(request.expiry_year())
                .currency(request.currency().to_uppercase())
                .amount(request.amount())
                .build()
        };

        if !report.is_empty() {
            let outcome = build_outcome(PaymentStatus::Rejected);
            info!("Payment {} rejected: {:?}", outcome.id(), report.codes());
            return Ok(ProcessedPayment::Rejected {
                outcome,
                errors: report.into_error_report(),
            });
        }

        let outcome = build_outcome(PaymentStatus::Authorized);
        self.store.insert(outcome.clone())?;
        info!("Payment {} authorized", outcome.id());
        Ok(ProcessedPayment::Accepted(outcome))
    }

    fn get(&self, id: &PaymentId) -> Result<Option<PaymentOutcome>, PaymentError> {
        self.store.get(id)
    }

    fn list_all(&self) -> Result<Vec<PaymentOutcome>, PaymentError> {
        self.store.list_all()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fake::{Fake, Faker};

    use super::*;
    use crate::engine::MockPaymentStore;
    use crate::{FixedClock, MemoryThreadSafePaymentStore, ValidationCode};

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
    }

    fn valid_request() -> PaymentRequest {
        PaymentRequest::builder()
            .card_number("4111111111111111")
            .expiry_month(12)
            .expiry_year(2027)
            .currency("GBP")
            .amount(1000)
            .cvv("123")
            .build()
    }

    #[test]
    fn test_valid_payment_is_authorized_and_stored() {
        let processor =
            CardPaymentProcessor::with_clock(MemoryThreadSafePaymentStore::new(), clock());

        let processed = processor.process(&valid_request()).unwrap();

        let outcome = processed.outcome().clone();
        assert!(processed.is_accepted());
        assert_eq!(outcome.status(), PaymentStatus::Authorized);
        assert_eq!(outcome.card_number_last_four(), 1111);
        assert_eq!(outcome.amount(), 1000);
        assert_eq!(processor.get(&outcome.id()).unwrap(), Some(outcome.clone()));
        assert_eq!(processor.list_all().unwrap(), vec![outcome]);
    }

    #[test]
    fn test_currency_is_uppercased() {
        let processor =
            CardPaymentProcessor::with_clock(MemoryThreadSafePaymentStore::new(), clock());
        let accepted = PaymentRequest::builder()
            .card_number("4111111111111111")
            .expiry_month(12)
            .expiry_year(2027)
            .currency("gbp")
            .amount(1000)
            .cvv("123")
            .build();
        let rejected = PaymentRequest::builder()
            .card_number("4111111111111111")
            .expiry_month(12)
            .expiry_year(2027)
            .currency("cad")
            .amount(1000)
            .cvv("123")
            .build();

        let accepted = processor.process(&accepted).unwrap();
        let rejected = processor.process(&rejected).unwrap();

        assert_eq!(accepted.outcome().currency(), "GBP");
        assert_eq!(rejected.outcome().currency(), "CAD");
    }

    #[test]
    fn test_rejected_payment_is_not_stored() {
        let mut store = MockPaymentStore::new();
        store.expect_insert().never();
        let processor = CardPaymentProcessor::with_clock(store, clock());
        let request = PaymentRequest::builder()
            .card_number("4111111111111111")
            .expiry_month(13)
            .expiry_year(2027)
            .currency("GBP")
            .amount(1000)
            .cvv("123")
            .build();

        let processed = processor.process(&request).unwrap();

        assert_eq!(processed.outcome().status(), PaymentStatus::Rejected);
        let errors = processed.errors().unwrap();
        assert_eq!(errors.status_code(), 400);
        assert_eq!(
            errors.validation_codes(),
            &[ValidationCode::ExpiryDateInvalidMonth]
        );
    }

    #[test]
    fn test_empty_card_number_is_rejected_with_zero_last_four() {
        let mut store = MockPaymentStore::new();
        store.expect_insert().never();
        let processor = CardPaymentProcessor::with_clock(store, clock());
        let request = PaymentRequest::builder()
            .card_number("")
            .expiry_month(12)
            .expiry_year(2027)
            .currency("GBP")
            .amount(1000)
            .cvv("123")
            .build();

        let processed = processor.process(&request).unwrap();

        let errors = processed.errors().unwrap();
        assert!(errors
            .validation_codes()
            .contains(&ValidationCode::CardNumberNull));
        assert!(errors
            .validation_codes()
            .contains(&ValidationCode::CardNumberIncorrectLength));
        assert_eq!(processed.outcome().card_number_last_four(), 0);
    }

    #[test]
    fn test_accepted_payment_is_inserted_once() {
        let mut store = MockPaymentStore::new();
        store
            .expect_insert()
            .times(1)
            .withf(|outcome| outcome.status() == PaymentStatus::Authorized)
            .returning(|_| Ok(()));
        let processor = CardPaymentProcessor::with_clock(store, clock());

        assert!(processor.process(&valid_request()).unwrap().is_accepted());
    }

    #[test]
    fn test_store_failure_is_propagated() {
        let mut store = MockPaymentStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(PaymentError::SyncError("poisoned".to_string())));
        let processor = CardPaymentProcessor::with_clock(store, clock());

        let result = processor.process(&valid_request());

        assert!(matches!(result, Err(PaymentError::SyncError(_))));
    }

    #[test]
    fn test_each_submission_gets_a_fresh_id() {
        let processor =
            CardPaymentProcessor::with_clock(MemoryThreadSafePaymentStore::new(), clock());

        let first = processor.process(&valid_request()).unwrap();
        let second = processor.process(&valid_request()).unwrap();

        assert_ne!(first.outcome().id(), second.outcome().id());
        assert_eq!(processor.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_lookups_are_delegated_to_store() {
        let outcome: PaymentOutcome = Faker.fake();
        let id = outcome.id();
        let mut store = MockPaymentStore::new();
        store
            .expect_get()
            .withf(move |requested| *requested == id)
            .times(1)
            .return_once(move |_| Ok(Some(outcome)));
        let processor = CardPaymentProcessor::with_clock(store, clock());

        assert!(processor.get(&id).unwrap().is_some());
    }
}
