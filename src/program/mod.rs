//! This module contains the definition of the pipeline trait and its implementation for running a
//! batch that reads payment requests from some `Source`, decides on them with some
//! `PaymentProcessor`, and writes every result to some `Sink`.
//!
//! # Example
//!
//! ```no_run
//! let processor = CardPaymentProcessor::new(MemoryThreadSafePaymentStore::new());
//! let mut pipeline = PaymentPipelineBuilder::csv_pipeline("payments.csv", processor);
//! pipeline.run()?;
//! ```
use std::path::Path;

use log::{info, warn};

use crate::{
    CSVPaymentRequestReader, JsonLinesWriter, PaymentError, PaymentProcessor, Sink, Source,
};

/// Represents a payment pipeline, consisting of a source, a processor, and a sink.
#[derive(Debug)]
pub struct PaymentPipeline<S, P, K> {
    source: S,
    processor: P,
    sink: K,
}

impl<S, P, K> PaymentPipeline<S, P, K> {
    pub fn new(source: S, processor: P, sink: K) -> Self {
        PaymentPipeline {
            source,
            processor,
            sink,
        }
    }
}

/// Builder for constructing a payment pipeline.
#[derive(Debug)]
pub struct PaymentPipelineBuilder {}

impl PaymentPipelineBuilder {
    /// Constructs a pipeline reading requests from a CSV file and writing JSON lines to stdout.
    ///
    /// # Arguments
    ///
    /// * `path` - The CSV file to read payment requests from.
    /// * `processor` - The processor deciding on each request.
    pub fn csv_pipeline<P>(path: impl AsRef<Path>, processor: P) -> Box<dyn Pipeline>
    where
        P: PaymentProcessor + 'static,
    {
        Box::new(PaymentPipeline {
            source: CSVPaymentRequestReader::new(path),
            processor,
            sink: JsonLinesWriter::stdout(),
        })
    }
}

/// Trait for defining a pipeline.
pub trait Pipeline {
    /// Runs the pipeline.
    ///
    /// # Returns
    ///
    /// A result indicating success or failure of the pipeline.
    fn run(&mut self) -> Result<(), PaymentError>;
}

impl<S, P, K> Pipeline for PaymentPipeline<S, P, K>
where
    S: Source,
    P: PaymentProcessor,
    K: Sink,
{
    fn run(&mut self) -> Result<(), PaymentError> {
        let (mut accepted, mut rejected, mut skipped) = (0usize, 0usize, 0usize);
        let reader = self.source.read()?;
        for record in reader {
            let request = record?;
            match self.processor.process(&request) {
                Ok(processed) => {
                    if processed.is_accepted() {
                        accepted += 1;
                    } else {
                        rejected += 1;
                    }
                    self.sink.write(&processed)?;
                }
                Err(e) if e.is_invalid_request() => {
                    warn!("Skipping {:?}: {}", request, e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(
            "Batch done: {} accepted, {} rejected, {} skipped",
            accepted, rejected, skipped
        );
        Ok(())
    }
}
