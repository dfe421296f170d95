//! Line-delimited JSON tool server
//!
//! One tool call per input line, one result per output line — the plumbing
//! a host agent runtime needs to drive the toolset headlessly:
//!
//! ```text
//! > {"id":"c1","name":"run_command","arguments":{"command":"ls"}}
//! < {"call_id":"c1","tool_name":"run_command","success":true,...}
//! ```

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use uuid::Uuid;

use shellbridge_tools::{Tool, ToolCall, ToolRegistry, ToolResult};

pub async fn run(registry: ToolRegistry) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let result = dispatch(&registry, &line).await;
        let mut encoded = serde_json::to_string(&result)?;
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

async fn dispatch(registry: &ToolRegistry, line: &str) -> ToolResult {
    let mut call: ToolCall = match serde_json::from_str(line) {
        Ok(call) => call,
        Err(err) => {
            warn!(%err, "rejecting malformed tool call");
            return ToolResult::error("", "serve", format!("malformed tool call: {err}"));
        }
    };
    if call.id.is_empty() {
        call.id = Uuid::new_v4().to_string();
    }

    let Some(tool) = registry.get(&call.name) else {
        return ToolResult::error(&call.id, &call.name, format!("unknown tool: {}", call.name));
    };

    debug!(tool = %call.name, call_id = %call.id, "dispatching tool call");
    tool.execute_with_timing(&call).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Cli;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[tokio::test]
    async fn malformed_input_yields_an_error_result() {
        let registry = ToolRegistry::new();
        let result = dispatch(&registry, "not json at all").await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("malformed"));
    }

    #[tokio::test]
    async fn unknown_tool_yields_an_error_result() {
        let registry = ToolRegistry::new();
        let result = dispatch(
            &registry,
            r#"{"id":"c1","name":"no_such_tool","arguments":{}}"#,
        )
        .await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("unknown tool"));
    }
}
