mod csv;
mod json;

pub use self::csv::CSVPaymentRequestReader;
pub use self::json::JsonLinesWriter;

use std::io::Write;

#[cfg(test)]
use mockall::automock;

use crate::PaymentError;
use crate::PaymentRequest;
use crate::ProcessedPayment;

pub trait Source {
    fn read(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<PaymentRequest, PaymentError>>>, PaymentError>;
}

impl Source for CSVPaymentRequestReader {
    fn read(
        &mut self,
    ) -> Result<Box<dyn Iterator<Item = Result<PaymentRequest, PaymentError>>>, PaymentError> {
        Ok(Box::new(self.iter()?))
    }
}

#[cfg_attr(test, automock)]
pub trait Sink {
    fn write(&mut self, record: &ProcessedPayment) -> Result<(), PaymentError>;
}

impl<W: Write> Sink for JsonLinesWriter<W> {
    fn write(&mut self, record: &ProcessedPayment) -> Result<(), PaymentError> {
        self.write_record(record)
    }
}
