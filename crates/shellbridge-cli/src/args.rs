//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shellbridge")]
#[command(about = "Drive a remote shell through a terminal transcript log")]
#[command(version)]
pub struct Cli {
    /// Path to a configuration file (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one command in the remote session and print its output
    Run {
        /// The command to execute in the remote shell
        command: String,

        /// Seconds to wait for the command's output
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Print recent transcript history within a token budget
    History {
        /// Budget for the returned history, in approximate tokens
        #[arg(long)]
        max_tokens: Option<usize>,
    },

    /// Manage a recording window on the live session
    Record {
        #[command(subcommand)]
        action: RecordAction,
    },

    /// List the registered tools and their schemas
    Tools,

    /// Serve tools over line-delimited JSON on stdin/stdout
    Serve,
}

#[derive(Subcommand)]
pub enum RecordAction {
    /// Open a recording window
    Start,

    /// Close the recording window and print the captured span
    Stop {
        /// Also persist the capture as a named procedure
        #[arg(long)]
        save: Option<String>,
    },
}
