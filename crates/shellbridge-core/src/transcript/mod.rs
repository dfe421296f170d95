//! Transcript access: locating, tailing and cleaning the terminal's log
//!
//! The transcript file is opened read-only and never written by this
//! crate; it is the terminal program's own session log, appended to as a
//! side effect of display.

mod ansi;
mod buffer;
mod locator;
mod tailer;

pub use ansi::strip_ansi;
pub use buffer::LineBuffer;
pub use locator::locate_latest;
pub use tailer::LogTailer;

use std::path::{Path, PathBuf};

use crate::config::TimingConfig;
use crate::error::BridgeResult;

/// Handle to one externally written transcript file.
///
/// Cheap to clone and carry around; the file itself is only opened by the
/// operations that need it (a [`LogTailer`] for live tailing, a full
/// re-read for history and recording).
#[derive(Debug, Clone)]
pub struct TranscriptFile {
    path: PathBuf,
}

impl TranscriptFile {
    /// Attach to the newest transcript in `log_dir`
    pub fn locate(log_dir: &Path) -> BridgeResult<Self> {
        Ok(Self {
            path: locate_latest(log_dir)?,
        })
    }

    /// Attach to a known transcript file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full fresh re-read of the transcript, decoded lossily and
    /// escape-stripped. History and recording read the whole file because
    /// their spans may predate any live tailing.
    pub fn read_clean(&self) -> BridgeResult<String> {
        let raw = std::fs::read(&self.path)?;
        Ok(strip_ansi(&String::from_utf8_lossy(&raw)))
    }

    /// [`read_clean`](Self::read_clean) split into lines with trailing
    /// carriage returns removed
    pub fn clean_lines(&self) -> BridgeResult<Vec<String>> {
        Ok(self
            .read_clean()?
            .split('\n')
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect())
    }

    /// Prepare a tailer for this transcript
    pub fn tail(&self, timing: &TimingConfig) -> BridgeResult<LogTailer> {
        LogTailer::new(&self.path, timing)
    }
}
