//! Business rules a card payment has to satisfy before it can be authorized.
//!
//! Every rule is evaluated on each request, so the resulting report lists all the
//! problems at once instead of stopping at the first one.
use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

use crate::domain::PaymentRequest;
use crate::domain::SupportedCurrency;
use crate::domain::ValidationCode;
use crate::domain::ValidationReport;

const CARD_NUMBER_LENGTH: RangeInclusive<usize> = 14..=19;
const CVV_LENGTH: RangeInclusive<usize> = 3..=4;
const ISO_CODE_LENGTH: usize = 3;
const MONTHS: RangeInclusive<i32> = 1..=12;

/// Evaluates `request` against every rule, using `today` as the reference date
/// for expiry checks.
///
/// # Examples
///
/// ```no_run
/// let report = validate(&request, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
/// if report.is_empty() {
///     // authorize
/// }
/// ```
pub fn validate(request: &PaymentRequest, today: NaiveDate) -> ValidationReport {
    let mut report = ValidationReport::new();
    check_card_number(request.card_number(), &mut report);
    check_expiry_date(
        request.expiry_month(),
        request.expiry_year(),
        today,
        &mut report,
    );
    check_currency(request.currency(), &mut report);
    check_cvv(request.cvv(), &mut report);
    report
}

fn check_card_number(card_number: &str, report: &mut ValidationReport) {
    if card_number.is_empty() {
        report.record(ValidationCode::CardNumberNull);
    }
    if !CARD_NUMBER_LENGTH.contains(&card_number.chars().count()) {
        report.record(ValidationCode::CardNumberIncorrectLength);
    }
    if !is_strictly_numeric(card_number) {
        report.record(ValidationCode::CardNumberNotStrictlyNumeric);
    }
}

fn check_expiry_date(month: i32, year: i32, today: NaiveDate, report: &mut ValidationReport) {
    if !MONTHS.contains(&month) {
        report.record(ValidationCode::ExpiryDateInvalidMonth);
    }
    if year < today.year() {
        report.record(ValidationCode::ExpiryDateInvalidYear);
    }
    // Compared as a calendar point, whether or not month and year are valid on their own.
    if (year, month) < (today.year(), today.month() as i32) {
        report.record(ValidationCode::ExpiryDateInThePast);
    }
}

fn check_currency(currency: &str, report: &mut ValidationReport) {
    if currency.chars().count() != ISO_CODE_LENGTH {
        report.record(ValidationCode::CurrencyInvalidFormatIso);
        return;
    }
    if SupportedCurrency::from_code(currency).is_none() {
        report.record(ValidationCode::CurrencyUnknownIso);
    }
}

fn check_cvv(cvv: &str, report: &mut ValidationReport) {
    if !CVV_LENGTH.contains(&cvv.chars().count()) {
        report.record(ValidationCode::CvvInvalidLength);
    }
    if !is_strictly_numeric(cvv) {
        report.record(ValidationCode::CvvNotStrictlyNumeric);
    }
}

fn is_strictly_numeric(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}
