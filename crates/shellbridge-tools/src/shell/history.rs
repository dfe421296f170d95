//! Transcript history retrieval tool

use std::sync::Arc;

use async_trait::async_trait;
use shellbridge_core::RemoteSession;
use tracing::instrument;

use crate::base::{Tool, ToolError};
use crate::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};

/// Returns the most recent transcript content within a token budget
pub struct HistoryTool {
    session: Arc<RemoteSession>,
    default_budget: usize,
}

impl HistoryTool {
    pub fn new(session: Arc<RemoteSession>) -> Self {
        Self {
            session,
            default_budget: shellbridge_core::config::DEFAULT_HISTORY_BUDGET,
        }
    }

    pub fn with_default_budget(mut self, budget: usize) -> Self {
        self.default_budget = budget;
        self
    }
}

#[async_trait]
impl Tool for HistoryTool {
    fn name(&self) -> &str {
        "get_history"
    }

    fn description(&self) -> &str {
        "Return the most recent content of the remote terminal's transcript.\n\n\
         The transcript is re-read in full, cleaned of escape sequences, and \
         truncated to the newest lines that fit within `max_tokens` (approximate \
         tokens). Truncation is lossy by design: the oldest content is dropped \
         first."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::integer(
                "max_tokens",
                "Budget for the returned history, in approximate tokens",
            )
            .optional()
            .with_default(shellbridge_core::config::DEFAULT_HISTORY_BUDGET as u64)],
        )
    }

    #[instrument(skip(self, call), fields(call_id = %call.id))]
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let budget = call.get_usize("max_tokens").unwrap_or(self.default_budget);

        let session = Arc::clone(&self.session);
        let history = tokio::task::spawn_blocking(move || session.history(budget))
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("history task failed: {e}")))??;

        Ok(ToolResult::success(
            &call.id,
            self.name(),
            format!("remote shell log\n\n```plaintext\n{history}\n```"),
        )
        .with_metadata("max_tokens", budget as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shellbridge_core::config::TimingConfig;
    use shellbridge_core::{BridgeResult, KeystrokeInjector, TranscriptFile};
    use std::collections::HashMap;

    struct NullInjector;

    impl KeystrokeInjector for NullInjector {
        fn inject(&self, _text: &str) -> BridgeResult<()> {
            Ok(())
        }

        fn activate(&self) -> BridgeResult<()> {
            Ok(())
        }
    }

    fn tool_over(content: &str, dir: &std::path::Path) -> HistoryTool {
        let path = dir.join("session.log");
        std::fs::write(&path, content).unwrap();
        let session = RemoteSession::with_parts(
            Box::new(NullInjector),
            TranscriptFile::from_path(path),
            TimingConfig::default(),
        );
        HistoryTool::new(Arc::new(session))
    }

    #[tokio::test]
    async fn fences_the_history_as_a_log_block() {
        let dir = tempfile::tempdir().unwrap();
        let tool = tool_over("alpha\nbeta\n", dir.path());
        let call = ToolCall::new("c1", "get_history", HashMap::new());

        let result = tool.execute(&call).await.unwrap();
        let output = result.output.unwrap();
        assert!(output.starts_with("remote shell log\n\n```plaintext\n"));
        assert!(output.contains("alpha\nbeta"));
        assert!(output.ends_with("```"));
    }

    #[tokio::test]
    async fn honors_the_budget_parameter() {
        let dir = tempfile::tempdir().unwrap();
        let tool = tool_over("a very old line of text\nnew\n", dir.path());
        let mut arguments = HashMap::new();
        arguments.insert("max_tokens".to_string(), json!(2));
        let call = ToolCall::new("c1", "get_history", arguments);

        let result = tool.execute(&call).await.unwrap();
        let output = result.output.unwrap();
        assert!(output.contains("new"));
        assert!(!output.contains("very old"));
        assert_eq!(result.metadata["max_tokens"], json!(2));
    }
}
