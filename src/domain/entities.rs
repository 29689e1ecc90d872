use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use super::errors::PaymentError;
use super::validation::ErrorReport;

pub type PaymentId = Uuid;

/// Final decision attached to a processed payment.
///
/// `Declined` is reserved for a downstream issuer decision and is never
/// produced by the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Authorized,
    Declined,
    Rejected,
}

#[cfg(test)]
impl fake::Dummy<fake::Faker> for PaymentStatus {
    fn dummy_with_rng<R: fake::Rng + ?Sized>(_: &fake::Faker, rng: &mut R) -> Self {
        match rng.gen_range(0..3) {
            0 => PaymentStatus::Authorized,
            1 => PaymentStatus::Declined,
            _ => PaymentStatus::Rejected,
        }
    }
}

/// ISO-4217 currencies the gateway accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedCurrency {
    Gbp,
    Usd,
    Eur,
}

impl SupportedCurrency {
    pub const ALL: [SupportedCurrency; 3] = [
        SupportedCurrency::Gbp,
        SupportedCurrency::Usd,
        SupportedCurrency::Eur,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SupportedCurrency::Gbp => "GBP",
            SupportedCurrency::Usd => "USD",
            SupportedCurrency::Eur => "EUR",
        }
    }

    /// Looks up a currency by its ISO code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
    }
}

/// A raw card payment as submitted by a merchant. Nothing is checked at
/// construction time, validity is decided by the validation engine.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[cfg_attr(test, derive(fake::Dummy))]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[serde(default)]
    #[builder(setter(into))]
    card_number: String,
    expiry_month: i32,
    expiry_year: i32,
    #[serde(default)]
    #[builder(setter(into))]
    currency: String,
    amount: u64,
    #[serde(default)]
    #[builder(setter(into))]
    cvv: String,
}

impl PaymentRequest {
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn expiry_month(&self) -> i32 {
        self.expiry_month
    }

    pub fn expiry_year(&self) -> i32 {
        self.expiry_year
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }
}

// Card data never reaches the logs in clear.
impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars: Vec<char> = self.card_number.chars().collect();
        let visible: String = chars[chars.len().saturating_sub(4)..].iter().collect();
        write!(
            f,
            "PaymentRequest [card ****{} - expiry {}/{} - amount {} {}]",
            visible, self.expiry_month, self.expiry_year, self.amount, self.currency
        )
    }
}

/// Derives the last four digits of a card number.
///
/// The trailing four characters are taken as given, whatever the length of the
/// whole number, and must all be ASCII digits.
pub fn card_number_last_four(card_number: &str) -> Result<u16, PaymentError> {
    let chars: Vec<char> = card_number.chars().collect();
    if chars.len() < 4 {
        return Err(PaymentError::MalformedCardNumber(format!(
            "expected at least 4 characters, got {}",
            chars.len()
        )));
    }
    chars[chars.len() - 4..]
        .iter()
        .try_fold(0u16, |acc, c| {
            c.to_digit(10).map(|digit| acc * 10 + digit as u16)
        })
        .ok_or_else(|| {
            PaymentError::MalformedCardNumber("last four characters are not digits".to_string())
        })
}

/// The record kept for a processed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[cfg_attr(test, derive(fake::Dummy))]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    #[builder(default = Uuid::new_v4())]
    id: PaymentId,
    status: PaymentStatus,
    card_number_last_four: u16,
    expiry_month: i32,
    expiry_year: i32,
    #[builder(setter(into))]
    currency: String,
    amount: u64,
}

impl PaymentOutcome {
    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn card_number_last_four(&self) -> u16 {
        self.card_number_last_four
    }

    pub fn expiry_month(&self) -> i32 {
        self.expiry_month
    }

    pub fn expiry_year(&self) -> i32 {
        self.expiry_year
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }
}

/// What a submission resolves to: either an accepted (and stored) outcome, or
/// a rejected outcome together with the full list of violated rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProcessedPayment {
    Accepted(PaymentOutcome),
    Rejected {
        outcome: PaymentOutcome,
        errors: ErrorReport,
    },
}

impl ProcessedPayment {
    pub fn outcome(&self) -> &PaymentOutcome {
        match self {
            ProcessedPayment::Accepted(outcome) => outcome,
            ProcessedPayment::Rejected { outcome, .. } => outcome,
        }
    }

    pub fn errors(&self) -> Option<&ErrorReport> {
        match self {
            ProcessedPayment::Accepted(_) => None,
            ProcessedPayment::Rejected { errors, .. } => Some(errors),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, ProcessedPayment::Accepted(_))
    }
}
