//! Marker-delimited command synchronization

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::TimingConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::sync::join_trimmed;
use crate::sync::markers::MarkerPair;
use crate::terminal::KeystrokeInjector;
use crate::transcript::LogTailer;

/// Runs one command in the remote shell and extracts exactly its output
/// from the tailed transcript stream.
///
/// Owns the tailer for the duration of the attempt; dropping the
/// synchronizer stops the reader thread and closes the transcript handle
/// on every exit path.
pub struct CommandSynchronizer<'a> {
    injector: &'a dyn KeystrokeInjector,
    tailer: LogTailer,
    poll: Duration,
    settle: Duration,
}

impl<'a> CommandSynchronizer<'a> {
    pub fn new(
        injector: &'a dyn KeystrokeInjector,
        tailer: LogTailer,
        timing: &TimingConfig,
    ) -> Self {
        Self {
            injector,
            tailer,
            poll: timing.sync_poll(),
            settle: timing.settle(),
        }
    }

    /// Inject `command` bracketed by fresh markers and wait for the span
    /// between them.
    ///
    /// Fails with [`BridgeError::CommandTimeout`] if the end marker is not
    /// observed within `timeout` of the injection — no earlier than
    /// `timeout`, no later than `timeout` plus one poll interval. The
    /// error carries whatever was captured after the start marker.
    pub fn run(&mut self, command: &str, timeout: Duration) -> BridgeResult<String> {
        let markers = MarkerPair::generate();
        let wrapped = markers.wrap(command);

        // Stale lines from a previous run must never satisfy this wait.
        self.tailer.clear();

        // Wake a dozing session so the prompt is fresh before the real
        // injection lands.
        self.injector.activate()?;
        std::thread::sleep(self.settle);

        info!(command, start = %markers.start, "injecting wrapped command");
        self.injector.inject(&wrapped)?;

        let deadline = Instant::now() + timeout;
        loop {
            let snapshot = self.tailer.read_snapshot();
            match scan(&snapshot, &markers) {
                Scan::Complete(output) => {
                    debug!(lines = snapshot.len(), "end marker observed");
                    return Ok(output);
                }
                Scan::Partial(partial) => {
                    if Instant::now() >= deadline {
                        return Err(BridgeError::CommandTimeout {
                            waited: timeout,
                            partial,
                        });
                    }
                }
            }
            std::thread::sleep(self.poll);
        }
    }
}

enum Scan {
    /// Both markers observed; the span between them
    Complete(String),
    /// End marker still missing; whatever followed the start marker so far
    Partial(String),
}

/// Scan a snapshot for the bracketed span.
///
/// Matching is exact line equality, never substring containment: the
/// terminal echoes the typed wrapper as one long line that contains both
/// markers as substrings, and only the executed `printf` output produces a
/// line exactly equal to a marker. A repeated start marker resets the
/// capture, so the match nearest the end marker wins.
fn scan(lines: &[String], markers: &MarkerPair) -> Scan {
    let mut started = false;
    let mut captured: Vec<&str> = Vec::new();
    for line in lines {
        if line == &markers.start {
            started = true;
            captured.clear();
            continue;
        }
        if started {
            if line == &markers.end {
                return Scan::Complete(join_trimmed(&captured));
            }
            captured.push(line);
        }
    }
    Scan::Partial(join_trimmed(&captured))
}
