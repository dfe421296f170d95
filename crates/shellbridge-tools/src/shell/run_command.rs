//! Remote command execution tool

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use shellbridge_core::{BridgeError, RemoteSession};
use tracing::instrument;

use crate::base::{Tool, ToolError};
use crate::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};

/// Executes a command in the attached remote terminal session
pub struct RunCommandTool {
    session: Arc<RemoteSession>,
    default_timeout: Duration,
}

impl RunCommandTool {
    pub fn new(session: Arc<RemoteSession>) -> Self {
        Self {
            session,
            default_timeout: Duration::from_secs(
                shellbridge_core::config::DEFAULT_COMMAND_TIMEOUT_SECS,
            ),
        }
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }
}

#[async_trait]
impl Tool for RunCommandTool {
    fn name(&self) -> &str {
        "run_command"
    }

    fn description(&self) -> &str {
        "Execute a command in the live remote terminal session and return its output.\n\n\
         The command is typed into the terminal program as keystrokes, bracketed by \
         unique markers, and the output is recovered from the terminal's transcript \
         log with escape sequences removed. There is no delivery acknowledgement: a \
         timeout only means no output was observed within the budget, and the \
         command may still be running remotely.\n\n\
         Usage notes:\n\
         - `command` is required and runs in the remote shell verbatim.\n\
         - `timeout_secs` bounds the wait for output (default 60). On timeout the \
           result carries any partially captured output in its metadata."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![
                ToolParameter::string("command", "The command to execute in the remote shell"),
                ToolParameter::integer("timeout_secs", "Seconds to wait for the command's output")
                    .optional()
                    .with_default(shellbridge_core::config::DEFAULT_COMMAND_TIMEOUT_SECS),
            ],
        )
    }

    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let command = call
            .get_string("command")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'command' parameter".into()))?;
        if command.trim().is_empty() {
            return Err(ToolError::InvalidArguments("command cannot be empty".into()));
        }
        Ok(())
    }

    #[instrument(skip(self, call), fields(call_id = %call.id))]
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let command = call
            .get_string("command")
            .ok_or_else(|| ToolError::InvalidArguments("missing 'command' parameter".into()))?;
        if command.trim().is_empty() {
            return Err(ToolError::InvalidArguments("command cannot be empty".into()));
        }
        let timeout = call
            .get_u64("timeout_secs")
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout);

        let session = Arc::clone(&self.session);
        // The engine blocks on polling sleeps; keep it off the async
        // runtime's worker threads.
        let outcome = tokio::task::spawn_blocking(move || session.run_command(&command, timeout))
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("synchronization task failed: {e}")))?;

        match outcome {
            Ok(output) => Ok(ToolResult::success(&call.id, self.name(), output)),
            Err(err @ BridgeError::CommandTimeout { .. }) => {
                // A timeout is a failed result, not a tool error; the
                // caller decides whether to retry with a larger budget.
                let mut result = ToolResult::error(&call.id, self.name(), err.to_string());
                if let Some(partial) = err.partial_output() {
                    result = result.with_metadata("partial_output", partial);
                }
                Ok(result)
            }
            Err(err) => Err(err.into()),
        }
    }
}
