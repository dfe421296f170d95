//! Background transcript tailer
//!
//! The transcript is append-only and written by a process outside our
//! control, so the only portable way to observe new content is a polling
//! reader: no inotify-style primitives are assumed to exist on the host.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::TimingConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::transcript::ansi::strip_ansi;
use crate::transcript::buffer::LineBuffer;

/// Tails a transcript file from its current end into a [`LineBuffer`].
///
/// The tailer exclusively owns the open file handle and read cursor; the
/// buffer is the only thing it shares. `stop` is idempotent and `Drop`
/// stops the thread, so the reader and the handle are released on every
/// exit path of a synchronization — success, timeout, or error.
pub struct LogTailer {
    path: PathBuf,
    buffer: LineBuffer,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    poll: Duration,
    join_wait: Duration,
}

impl LogTailer {
    /// Prepare a tailer for `path`.
    ///
    /// Fails synchronously with `TranscriptNotFound` when the file does
    /// not exist — surfaced to the caller before any command is attempted
    /// and before any background thread starts.
    pub fn new(path: &Path, timing: &TimingConfig) -> BridgeResult<Self> {
        if !path.is_file() {
            return Err(BridgeError::TranscriptNotFound(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            buffer: LineBuffer::new(),
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
            poll: timing.tail_poll(),
            join_wait: timing.join_wait(),
        })
    }

    /// Open the transcript, seek to its end, and launch the reader thread.
    ///
    /// Calling `start` on a running tailer is a no-op.
    pub fn start(&mut self) -> BridgeResult<()> {
        if self.handle.is_some() {
            return Ok(());
        }
        let mut reader = BufReader::new(File::open(&self.path)?);
        reader.seek(SeekFrom::End(0))?;

        self.stop.store(false, Ordering::Relaxed);
        let stop = Arc::clone(&self.stop);
        let buffer = self.buffer.clone();
        let poll = self.poll;
        let path = self.path.clone();

        debug!(path = %path.display(), "starting transcript tailer");
        self.handle = Some(std::thread::spawn(move || {
            tail_loop(reader, buffer, stop, poll, &path);
        }));
        Ok(())
    }

    /// Point-in-time copy of all buffered lines
    pub fn read_snapshot(&self) -> Vec<String> {
        self.buffer.snapshot()
    }

    /// Drop buffered lines so stale markers can't satisfy a new wait
    pub fn clear(&self) {
        self.buffer.clear();
    }

    /// Signal the reader to exit and join it with a bounded wait.
    ///
    /// Safe to call before `start`, after `stop`, and repeatedly. A thread
    /// that outlives the wait (it never blocks longer than one poll) is
    /// detached with a warning rather than hanging the caller.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        let Some(handle) = self.handle.take() else {
            return;
        };
        let deadline = Instant::now() + self.join_wait;
        while !handle.is_finished() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        if handle.is_finished() {
            let _ = handle.join();
        } else {
            warn!(path = %self.path.display(), "tailer thread did not exit in time, detaching");
        }
    }
}

impl Drop for LogTailer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tail_loop(
    mut reader: BufReader<File>,
    buffer: LineBuffer,
    stop: Arc<AtomicBool>,
    poll: Duration,
    path: &Path,
) {
    // Writers append in arbitrary chunks, so a read may end mid-line;
    // `pending` accumulates until the terminating newline arrives.
    let mut pending = String::new();
    while !stop.load(Ordering::Relaxed) {
        match reader.read_line(&mut pending) {
            Ok(0) => std::thread::sleep(poll),
            Ok(_) => {
                if pending.ends_with('\n') {
                    let clean = strip_ansi(pending.trim_end_matches(['\n', '\r']));
                    buffer.push(clean);
                    pending.clear();
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "transcript read failed");
                std::thread::sleep(poll);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::io::Write;

    fn fast_timing() -> TimingConfig {
        TimingConfig {
            tail_poll_ms: 5,
            sync_poll_ms: 10,
            settle_ms: 0,
            join_wait_ms: 500,
        }
    }

    fn wait_for_lines(tailer: &LogTailer, count: usize) -> Vec<String> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            let snap = tailer.read_snapshot();
            if snap.len() >= count || Instant::now() >= deadline {
                return snap;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn missing_file_fails_before_any_thread() {
        let err = LogTailer::new(Path::new("/no/such/transcript.log"), &fast_timing());
        assert!(matches!(err, Err(BridgeError::TranscriptNotFound(_))));
    }

    #[test]
    fn only_sees_lines_written_after_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        std::fs::write(&path, "ancient history\n").unwrap();

        let mut tailer = LogTailer::new(&path, &fast_timing()).unwrap();
        tailer.start().unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "fresh line").unwrap();
        file.flush().unwrap();

        let snap = wait_for_lines(&tailer, 1);
        assert_eq!(snap, vec!["fresh line"]);
        tailer.stop();
    }

    #[test]
    fn strips_escapes_and_carriage_returns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        std::fs::write(&path, "").unwrap();

        let mut tailer = LogTailer::new(&path, &fast_timing()).unwrap();
        tailer.start().unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"\x1B[32mgreen\x1B[0m\r\n").unwrap();
        file.flush().unwrap();

        let snap = wait_for_lines(&tailer, 1);
        assert_eq!(snap, vec!["green"]);
        tailer.stop();
    }

    #[test]
    fn reassembles_partially_written_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        std::fs::write(&path, "").unwrap();

        let mut tailer = LogTailer::new(&path, &fast_timing()).unwrap();
        tailer.start().unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"first ha").unwrap();
        file.flush().unwrap();
        std::thread::sleep(Duration::from_millis(50));
        file.write_all(b"lf joined\n").unwrap();
        file.flush().unwrap();

        let snap = wait_for_lines(&tailer, 1);
        assert_eq!(snap, vec!["first half joined"]);
        tailer.stop();
    }

    #[test]
    fn stop_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        std::fs::write(&path, "").unwrap();

        let mut tailer = LogTailer::new(&path, &fast_timing()).unwrap();
        tailer.stop(); // before start
        tailer.start().unwrap();
        tailer.stop();
        tailer.stop(); // after stop
    }

    #[test]
    fn clear_guards_against_stale_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.log");
        std::fs::write(&path, "").unwrap();

        let mut tailer = LogTailer::new(&path, &fast_timing()).unwrap();
        tailer.start().unwrap();

        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "stale").unwrap();
        file.flush().unwrap();
        wait_for_lines(&tailer, 1);

        tailer.clear();
        assert!(tailer.read_snapshot().is_empty());

        writeln!(file, "current").unwrap();
        file.flush().unwrap();
        let snap = wait_for_lines(&tailer, 1);
        assert_eq!(snap, vec!["current"]);
        tailer.stop();
    }
}
