//! Tool layer over the shellbridge synchronization engine
//!
//! Wraps the core session operations as schema-described tools a host
//! agent runtime can register and call: `run_command`, `get_history`,
//! `start_recording` and `stop_recording`, plus JSON persistence of
//! recorded procedures.

pub mod base;
pub mod procedures;
pub mod registry;
pub mod shell;
pub mod types;

use std::sync::Arc;

use shellbridge_core::RemoteSession;

pub use base::{Tool, ToolError};
pub use procedures::{Procedure, ProcedureStore};
pub use registry::ToolRegistry;
pub use types::{ToolCall, ToolParameter, ToolResult, ToolSchema};

/// Registry pre-loaded with the shell toolset over one shared session.
///
/// The session is long-lived on purpose: a recording window opened by one
/// tool call is closed by a later one. Command execution itself attaches
/// and tears down its own tailer per call.
pub fn default_registry(
    session: Arc<RemoteSession>,
    store: Option<ProcedureStore>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(shell::RunCommandTool::new(Arc::clone(&session))));
    registry.register(Arc::new(shell::HistoryTool::new(Arc::clone(&session))));
    registry.register(Arc::new(shell::StartRecordingTool::new(Arc::clone(
        &session,
    ))));
    registry.register(Arc::new(shell::StopRecordingTool::new(session, store)));
    registry
}
