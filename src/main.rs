use std::sync::Arc;

use clap::Parser;
use payment_gateway_mock::config::{Cli, Command};
use payment_gateway_mock::http;
use payment_gateway_mock::{
    CardPaymentProcessor, MemoryThreadSafePaymentStore, PaymentPipelineBuilder,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let store = if cli.seed_demo_payments {
        MemoryThreadSafePaymentStore::with_demo_payments()
    } else {
        MemoryThreadSafePaymentStore::new()
    };
    let processor = CardPaymentProcessor::new(store);

    match cli.command {
        Command::Serve(args) => http::serve(args.addr, Arc::new(processor)).await?,
        Command::Process(args) => {
            let mut pipeline = PaymentPipelineBuilder::csv_pipeline(&args.input, processor);
            pipeline.run()?;
        }
    }
    Ok(())
}
