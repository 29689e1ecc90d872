//! Command line and environment configuration.
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seed the store with one demonstration payment of each status
    #[arg(long, global = true, env = "PAYMENTS_SEED_DEMO")]
    pub seed_demo_payments: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the payments API over HTTP
    Serve(ServeArgs),
    /// Process a CSV file of payment requests and print the results as JSON lines
    Process(ProcessArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "PAYMENTS_BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input payment requests CSV file
    pub input: PathBuf,
}
