//! Command routing

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use shellbridge_core::{BridgeConfig, BridgeError, RemoteSession};
use shellbridge_tools::{default_registry, ProcedureStore};

use crate::args::{Cli, Commands, RecordAction};
use crate::serve;

pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let config = BridgeConfig::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Commands::Run { command, timeout } => {
            let session = connect(&config)?;
            let timeout = timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.command_timeout());
            let session = Arc::new(session);
            let moved = Arc::clone(&session);
            let outcome =
                tokio::task::spawn_blocking(move || moved.run_command(&command, timeout)).await?;
            match outcome {
                Ok(output) => println!("{output}"),
                Err(err @ BridgeError::CommandTimeout { .. }) => {
                    if let Some(partial) = err.partial_output() {
                        eprintln!("partial output before timeout:\n{partial}");
                    }
                    return Err(err.into());
                }
                Err(err) => return Err(err.into()),
            }
        }

        Commands::History { max_tokens } => {
            let session = connect(&config)?;
            let budget = max_tokens.unwrap_or(config.history_budget);
            println!("{}", session.history(budget)?);
        }

        Commands::Record { action } => {
            let session = connect(&config)?;
            match action {
                RecordAction::Start => {
                    session.start_recording()?;
                    eprintln!("recording started");
                }
                RecordAction::Stop { save } => {
                    let recorded = session.stop_recording()?;
                    if let Some(name) = save {
                        let store = procedure_store(&config)
                            .context("procedure_dir is not configured")?;
                        let path = store.save(&name, &recorded)?;
                        eprintln!("saved procedure to {}", path.display());
                    }
                    println!("{recorded}");
                }
            }
        }

        Commands::Tools => {
            let session = Arc::new(connect(&config)?);
            let registry = default_registry(session, procedure_store(&config));
            for schema in registry.schemas() {
                let summary = schema.description.lines().next().unwrap_or_default();
                println!("{:<18} {summary}", schema.name);
            }
        }

        Commands::Serve => {
            let session = Arc::new(connect(&config)?);
            let registry = default_registry(session, procedure_store(&config));
            serve::run(registry).await?;
        }
    }

    Ok(())
}

fn connect(config: &BridgeConfig) -> anyhow::Result<RemoteSession> {
    RemoteSession::connect(config).context("attaching to the remote session")
}

fn procedure_store(config: &BridgeConfig) -> Option<ProcedureStore> {
    config.procedure_dir().map(ProcedureStore::new)
}
