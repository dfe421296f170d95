//! Long- or short-lived handle to one remote terminal session

use std::time::Duration;

use tracing::info;

use crate::config::{BridgeConfig, TimingConfig};
use crate::error::BridgeResult;
use crate::sync::{CommandSynchronizer, HistoryRetriever, RecordingSession};
use crate::terminal::{injector_for, KeystrokeInjector};
use crate::text::{TextMeasurer, TokenEstimator};
use crate::transcript::TranscriptFile;

/// One attached remote session: an injector pointed at the terminal
/// program and the transcript file it writes.
///
/// A session may live for a single call (command execution is
/// self-contained) or across many (a recording window spans separate
/// calls). Each `run_command` constructs and tears down its own tailer;
/// recording and history work from full transcript reads, so nothing
/// lingers between calls. Only one command synchronization should be
/// active per transcript at a time.
pub struct RemoteSession {
    injector: Box<dyn KeystrokeInjector>,
    transcript: TranscriptFile,
    timing: TimingConfig,
    measurer: Box<dyn TextMeasurer>,
}

impl RemoteSession {
    /// Resolve the configured target and attach to its newest transcript.
    ///
    /// All setup failures — unknown target, bad log directory, missing
    /// transcript — surface here, before any command is attempted.
    pub fn connect(config: &BridgeConfig) -> BridgeResult<Self> {
        let log_dir = config.log_dir()?;
        let transcript = TranscriptFile::locate(&log_dir)?;
        info!(
            target = %config.target,
            transcript = %transcript.path().display(),
            "attached to remote session"
        );
        Ok(Self {
            injector: injector_for(config.target, config.target_id()),
            transcript,
            timing: config.timing.clone(),
            measurer: Box::new(TokenEstimator::new()),
        })
    }

    /// Assemble a session from explicit parts (custom targets, tests)
    pub fn with_parts(
        injector: Box<dyn KeystrokeInjector>,
        transcript: TranscriptFile,
        timing: TimingConfig,
    ) -> Self {
        Self {
            injector,
            transcript,
            timing,
            measurer: Box::new(TokenEstimator::new()),
        }
    }

    /// Transcript this session synchronizes against
    pub fn transcript(&self) -> &TranscriptFile {
        &self.transcript
    }

    /// Run `command` in the remote shell and return exactly its output.
    ///
    /// The tailer attached for this call is stopped on every exit path —
    /// success, timeout, or error — when the synchronizer drops.
    pub fn run_command(&self, command: &str, timeout: Duration) -> BridgeResult<String> {
        let mut tailer = self.transcript.tail(&self.timing)?;
        tailer.start()?;
        let mut sync = CommandSynchronizer::new(self.injector.as_ref(), tailer, &self.timing);
        sync.run(command, timeout)
    }

    /// Most recent transcript content within `budget` measurement units
    pub fn history(&self, budget: usize) -> BridgeResult<String> {
        HistoryRetriever::new(&self.transcript, self.measurer.as_ref()).get(budget)
    }

    /// Open a recording window on the live session
    pub fn start_recording(&self) -> BridgeResult<()> {
        self.recording().start()
    }

    /// Close the recording window and return the captured span
    pub fn stop_recording(&self) -> BridgeResult<String> {
        self.recording().stop()
    }

    fn recording(&self) -> RecordingSession<'_> {
        RecordingSession::new(
            self.injector.as_ref(),
            &self.transcript,
            self.timing.settle(),
        )
    }
}

impl std::fmt::Debug for RemoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSession")
            .field("transcript", &self.transcript)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}
