use std::fmt;
use std::io::{self, Stdout, Write};

use crate::PaymentError;
use crate::ProcessedPayment;

/// Writes one JSON document per processed payment, newline separated.
pub struct JsonLinesWriter<W> {
    writer: W,
}

impl<W> fmt::Debug for JsonLinesWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonLinesWriter")
    }
}

impl JsonLinesWriter<Stdout> {
    pub fn stdout() -> Self {
        JsonLinesWriter {
            writer: io::stdout(),
        }
    }
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesWriter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_record(&mut self, record: &ProcessedPayment) -> Result<(), PaymentError> {
        serde_json::to_writer(&mut self.writer, record)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
