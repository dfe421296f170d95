//! Base trait and error type for tools

use std::time::Instant;

use async_trait::async_trait;
use shellbridge_core::BridgeError;

use crate::types::{ToolCall, ToolResult, ToolSchema};

/// Error type for tool operations
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Invalid arguments provided to the tool
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Tool not found
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Command output wait timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<BridgeError> for ToolError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::CommandTimeout { .. } => Self::Timeout(err.to_string()),
            BridgeError::Io(e) => Self::Io(e),
            other => Self::ExecutionFailed(other.to_string()),
        }
    }
}

/// Base trait for all tools
///
/// Each tool carries a schema for the host runtime, validates its
/// arguments, and executes asynchronously.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (lowercase with underscores)
    fn name(&self) -> &str;

    /// Description included in the host's tool listing
    fn description(&self) -> &str;

    /// JSON schema for input parameters
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError>;

    /// Validate the tool call arguments.
    ///
    /// Default implementation does nothing. Override for custom validation.
    fn validate(&self, call: &ToolCall) -> Result<(), ToolError> {
        let _ = call;
        Ok(())
    }

    /// Execute with validation, timing, and error-to-result conversion
    async fn execute_with_timing(&self, call: &ToolCall) -> ToolResult {
        let start_time = Instant::now();

        if let Err(err) = self.validate(call) {
            return ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64);
        }

        match self.execute(call).await {
            Ok(mut result) => {
                result.execution_time_ms = Some(start_time.elapsed().as_millis() as u64);
                result
            }
            Err(err) => ToolResult::error(&call.id, self.name(), err.to_string())
                .with_execution_time(start_time.elapsed().as_millis() as u64),
        }
    }
}
