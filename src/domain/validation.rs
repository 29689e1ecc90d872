use serde::{Deserialize, Serialize};

/// Status code reported along with every rejected payment.
pub const BAD_REQUEST_STATUS: u16 = 400;

/// One business rule a payment request can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValidationCode {
    CardNumberNull,
    CardNumberIncorrectLength,
    CardNumberNotStrictlyNumeric,
    ExpiryDateInvalidMonth,
    ExpiryDateInvalidYear,
    ExpiryDateInThePast,
    CurrencyInvalidFormatIso,
    CurrencyUnknownIso,
    CvvInvalidLength,
    CvvNotStrictlyNumeric,
}

impl ValidationCode {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationCode::CardNumberNull => "Enter a card number.",
            ValidationCode::CardNumberIncorrectLength => {
                "Card number needs to be between 14 and 19 characters."
            }
            ValidationCode::CardNumberNotStrictlyNumeric => {
                "Card number can only contain numbers 0-9."
            }
            ValidationCode::ExpiryDateInvalidMonth => "Enter a valid calendar month between 1-12.",
            ValidationCode::ExpiryDateInvalidYear => {
                "Enter a year in the future or the current year."
            }
            ValidationCode::ExpiryDateInThePast => {
                "Enter a date which is this month/year or in the future."
            }
            ValidationCode::CurrencyInvalidFormatIso => {
                "Enter a valid 3 letter ISO code for the currency."
            }
            ValidationCode::CurrencyUnknownIso => {
                "ISO code not recognised for eligible transaction."
            }
            ValidationCode::CvvInvalidLength => "CVV needs to be between 3 and 4 characters.",
            ValidationCode::CvvNotStrictlyNumeric => "CVV can only contain numbers 0-9.",
        }
    }
}

/// Ordered set of rules violated by a request. Empty means the request passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    codes: Vec<ValidationCode>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violated rule. A rule is reported once no matter how many
    /// times it is recorded.
    pub fn record(&mut self, code: ValidationCode) {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn contains(&self, code: ValidationCode) -> bool {
        self.codes.contains(&code)
    }

    pub fn codes(&self) -> &[ValidationCode] {
        &self.codes
    }

    /// (rule code, message) pairs in the order the rules were recorded.
    pub fn failures(&self) -> impl Iterator<Item = (ValidationCode, &'static str)> + '_ {
        self.codes.iter().map(|code| (*code, code.message()))
    }

    pub fn into_error_report(self) -> ErrorReport {
        let messages = self
            .codes
            .iter()
            .map(|code| code.message().to_string())
            .collect();
        ErrorReport {
            status_code: BAD_REQUEST_STATUS,
            validation_codes: self.codes,
            messages,
        }
    }
}

/// Client error body returned for a rejected payment. `messages` runs
/// parallel to `validation_codes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    status_code: u16,
    validation_codes: Vec<ValidationCode>,
    messages: Vec<String>,
}

impl ErrorReport {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn validation_codes(&self) -> &[ValidationCode] {
        &self.validation_codes
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
