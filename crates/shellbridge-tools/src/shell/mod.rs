//! Remote shell tools

mod history;
mod recording;
mod run_command;

pub use history::HistoryTool;
pub use recording::{StartRecordingTool, StopRecordingTool};
pub use run_command::RunCommandTool;
