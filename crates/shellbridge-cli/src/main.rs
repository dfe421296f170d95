//! Shellbridge CLI
//!
//! Drives a remote shell that lives inside a terminal multiplexer pane by
//! injecting keystrokes and recovering output from the terminal's
//! transcript log.
//!
//! ```bash
//! shellbridge run "ls -la"          # run one command, print its output
//! shellbridge history               # budgeted tail of the transcript
//! shellbridge record start          # open a recording window
//! shellbridge record stop --save x  # close it and persist the capture
//! shellbridge tools                 # list the tool schemas
//! shellbridge serve                 # line-delimited JSON tool server
//! ```

mod args;
mod commands;
mod serve;

use clap::Parser;

use crate::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::route(cli).await
}
