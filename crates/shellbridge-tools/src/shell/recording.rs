//! Recording window tools
//!
//! Recording spans multiple tool calls by nature: `start_recording` opens
//! the window, arbitrary activity happens on the session, and a later
//! `stop_recording` call recovers the whole span. The window state lives
//! in the transcript itself (the injected markers), so it even survives
//! host restarts between the two calls.

use std::sync::Arc;

use async_trait::async_trait;
use shellbridge_core::RemoteSession;
use tracing::instrument;

use crate::base::{Tool, ToolError};
use crate::procedures::ProcedureStore;
use crate::types::{ToolCall, ToolParameter, ToolResult, ToolSchema};

/// Opens a recording window on the live session
pub struct StartRecordingTool {
    session: Arc<RemoteSession>,
}

impl StartRecordingTool {
    pub fn new(session: Arc<RemoteSession>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Tool for StartRecordingTool {
    fn name(&self) -> &str {
        "start_recording"
    }

    fn description(&self) -> &str {
        "Start recording the remote terminal session.\n\n\
         Injects a start marker into the live session; everything that happens \
         afterwards is part of the recording until `stop_recording` is called."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description(), vec![])
    }

    #[instrument(skip(self, call), fields(call_id = %call.id))]
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let session = Arc::clone(&self.session);
        tokio::task::spawn_blocking(move || session.start_recording())
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("recording task failed: {e}")))??;
        Ok(ToolResult::success(
            &call.id,
            self.name(),
            "Recording started",
        ))
    }
}

/// Closes the recording window and returns the captured span
pub struct StopRecordingTool {
    session: Arc<RemoteSession>,
    store: Option<ProcedureStore>,
}

impl StopRecordingTool {
    pub fn new(session: Arc<RemoteSession>, store: Option<ProcedureStore>) -> Self {
        Self { session, store }
    }
}

#[async_trait]
impl Tool for StopRecordingTool {
    fn name(&self) -> &str {
        "stop_recording"
    }

    fn description(&self) -> &str {
        "Stop recording the remote terminal session and return everything \
         captured since `start_recording`.\n\n\
         Fails if no recording was started. Pass `save_as` to also persist the \
         captured span as a named procedure for later reuse."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(
            self.name(),
            self.description(),
            vec![ToolParameter::optional_string(
                "save_as",
                "Persist the recording as a procedure under this name",
            )],
        )
    }

    #[instrument(skip(self, call), fields(call_id = %call.id))]
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult, ToolError> {
        let session = Arc::clone(&self.session);
        let recorded = tokio::task::spawn_blocking(move || session.stop_recording())
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("recording task failed: {e}")))??;

        let mut result = ToolResult::success(&call.id, self.name(), recorded.clone());
        if let Some(name) = call.get_string("save_as") {
            let store = self.store.as_ref().ok_or_else(|| {
                ToolError::InvalidArguments(
                    "no procedure directory configured; cannot save".into(),
                )
            })?;
            let path = store.save(&name, &recorded)?;
            result = result.with_metadata("saved_to", path.display().to_string());
        }
        Ok(result)
    }
}
