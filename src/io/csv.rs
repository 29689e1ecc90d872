use std::fmt;
use std::path::{Path, PathBuf};

use crate::PaymentError;
use crate::PaymentRequest;

/// Reads payment requests from a CSV file with a `cardNumber,expiryMonth,expiryYear,currency,amount,cvv` header.
#[derive(Debug)]
pub struct CSVPaymentRequestReader {
    path: PathBuf,
}

impl CSVPaymentRequestReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CSVPaymentRequestReader {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn iter(
        &self,
    ) -> Result<impl Iterator<Item = Result<PaymentRequest, PaymentError>>, PaymentError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        Ok(reader
            .into_deserialize::<PaymentRequest>()
            .map(|record| record.map_err(PaymentError::from)))
    }
}

impl fmt::Display for CSVPaymentRequestReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CSV {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_requests() {
        let reader = CSVPaymentRequestReader::new("tests/data/payments_mixed.csv");

        let requests = reader
            .iter()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].card_number(), "4111111111111111");
        assert_eq!(requests[0].currency(), "GBP");
        assert_eq!(requests[1].card_number(), "");
    }

    #[test]
    fn test_missing_file_fails() {
        let reader = CSVPaymentRequestReader::new("tests/data/does_not_exist.csv");
        assert!(matches!(reader.iter(), Err(PaymentError::CSVError(_))));
    }
}
