//! Open-ended session recording
//!
//! A recording window is the same sentinel idea as command bracketing,
//! stretched across two separate calls: `start` injects the opening
//! marker now, `stop` injects the closing one later and recovers the span
//! in between. The window can outlive any single tailer, so `stop` scans
//! the full transcript content instead of a tailed buffer.

use std::time::Duration;

use tracing::info;

use crate::error::{BridgeError, BridgeResult};
use crate::sync::join_trimmed;
use crate::sync::markers::{END_RECORD_MARKER, START_RECORD_MARKER};
use crate::terminal::KeystrokeInjector;
use crate::transcript::TranscriptFile;

/// Captures an open-ended span of the transcript between fixed markers.
///
/// At most one window is meaningfully open at a time; a second `start`
/// moves the window's left edge, because the backward scan in `stop`
/// stops at the marker nearest the end.
pub struct RecordingSession<'a> {
    injector: &'a dyn KeystrokeInjector,
    transcript: &'a TranscriptFile,
    settle: Duration,
}

impl<'a> RecordingSession<'a> {
    pub fn new(
        injector: &'a dyn KeystrokeInjector,
        transcript: &'a TranscriptFile,
        settle: Duration,
    ) -> Self {
        Self {
            injector,
            transcript,
            settle,
        }
    }

    /// Inject the start-record marker; the window stays open until `stop`
    pub fn start(&self) -> BridgeResult<()> {
        info!("opening recording window");
        self.injector.inject(&marker_command(START_RECORD_MARKER))
    }

    /// Inject the end-record marker and return the recorded span in
    /// chronological order.
    ///
    /// Fails with [`BridgeError::RecordingNotStarted`] when no start
    /// marker exists in the transcript: returning the whole backward scan
    /// instead would hand the caller an unbounded, unrelated span.
    pub fn stop(&self) -> BridgeResult<String> {
        info!("closing recording window");
        self.injector.inject(&marker_command(END_RECORD_MARKER))?;
        // Give the terminal a moment to flush the marker to the log.
        std::thread::sleep(self.settle);

        let lines = self.transcript.clean_lines()?;
        let mut window: Vec<&str> = Vec::new();
        for line in lines.iter().rev() {
            if line == START_RECORD_MARKER {
                window.reverse();
                return Ok(join_trimmed(&window));
            }
            if line == END_RECORD_MARKER || is_marker_echo(line) {
                continue;
            }
            window.push(line);
        }
        Err(BridgeError::RecordingNotStarted)
    }
}

fn marker_command(marker: &str) -> String {
    format!("printf '%s\\n' '{marker}'")
}

/// The typed `printf` wrapper is echoed by the terminal before it runs;
/// those lines contain a marker as a substring but are not the marker
/// line itself, and don't belong in the captured procedure.
fn is_marker_echo(line: &str) -> bool {
    line.contains("printf")
        && (line.contains(START_RECORD_MARKER) || line.contains(END_RECORD_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MockKeystrokeInjector;
    use std::fs;

    fn transcript_with(content: &str) -> (tempfile::TempDir, TranscriptFile) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        fs::write(&path, content).unwrap();
        (dir, TranscriptFile::from_path(path))
    }

    fn permissive_injector() -> MockKeystrokeInjector {
        let mut injector = MockKeystrokeInjector::new();
        injector.expect_inject().returning(|_| Ok(()));
        injector.expect_activate().returning(|| Ok(()));
        injector
    }

    #[test]
    fn start_injects_the_start_marker_command() {
        let (_dir, transcript) = transcript_with("");
        let mut injector = MockKeystrokeInjector::new();
        injector
            .expect_inject()
            .withf(|text| text.contains(START_RECORD_MARKER) && text.starts_with("printf"))
            .times(1)
            .returning(|_| Ok(()));

        let session = RecordingSession::new(&injector, &transcript, Duration::ZERO);
        session.start().unwrap();
    }

    #[test]
    fn stop_returns_the_window_in_forward_order() {
        let content = format!(
            "banner\n{START_RECORD_MARKER}\nstep one\nstep two\nstep three\n"
        );
        let (_dir, transcript) = transcript_with(&content);
        let injector = permissive_injector();

        let session = RecordingSession::new(&injector, &transcript, Duration::ZERO);
        let recorded = session.stop().unwrap();
        assert_eq!(recorded, "step one\nstep two\nstep three");
    }

    #[test]
    fn stop_uses_the_nearest_start_marker() {
        let content = format!(
            "{START_RECORD_MARKER}\nold window\n{START_RECORD_MARKER}\nnew window\n"
        );
        let (_dir, transcript) = transcript_with(&content);
        let injector = permissive_injector();

        let session = RecordingSession::new(&injector, &transcript, Duration::ZERO);
        assert_eq!(session.stop().unwrap(), "new window");
    }

    #[test]
    fn stop_excludes_marker_lines_and_echoes() {
        let content = format!(
            "{START_RECORD_MARKER}\nuser@host$ printf '%s\\n' '{END_RECORD_MARKER}'\npayload\n{END_RECORD_MARKER}\n"
        );
        let (_dir, transcript) = transcript_with(&content);
        let injector = permissive_injector();

        let session = RecordingSession::new(&injector, &transcript, Duration::ZERO);
        assert_eq!(session.stop().unwrap(), "payload");
    }

    #[test]
    fn stop_without_start_fails_explicitly() {
        let (_dir, transcript) = transcript_with("just a prompt\nand some noise\n");
        let injector = permissive_injector();

        let session = RecordingSession::new(&injector, &transcript, Duration::ZERO);
        assert!(matches!(
            session.stop(),
            Err(BridgeError::RecordingNotStarted)
        ));
    }
}
