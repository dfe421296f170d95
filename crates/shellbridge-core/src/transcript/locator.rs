//! Locating the newest transcript file in a log directory

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{BridgeError, BridgeResult};

/// Newest `*.log` file in `log_dir` by modification time.
///
/// Terminal programs keep one log file per session; the freshest one
/// belongs to the session currently on screen.
pub fn locate_latest(log_dir: &Path) -> BridgeResult<PathBuf> {
    if !log_dir.is_dir() {
        return Err(BridgeError::InvalidLogDir(log_dir.to_path_buf()));
    }

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !has_log_extension(&path) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map(|(t, _)| modified > *t).unwrap_or(true) {
            newest = Some((modified, path));
        }
    }

    match newest {
        Some((_, path)) => {
            debug!(path = %path.display(), "located transcript");
            Ok(path)
        }
        None => Err(BridgeError::TranscriptNotFound(log_dir.to_path_buf())),
    }
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("log"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_directory_is_invalid() {
        let err = locate_latest(Path::new("/no/such/dir")).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidLogDir(_)));
    }

    #[test]
    fn empty_directory_has_no_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate_latest(dir.path()).unwrap_err();
        assert!(matches!(err, BridgeError::TranscriptNotFound(_)));
    }

    #[test]
    fn ignores_non_log_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a transcript").unwrap();
        assert!(locate_latest(dir.path()).is_err());
    }

    #[test]
    fn picks_the_newest_log() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("session-1.log");
        let new = dir.path().join("session-2.LOG");
        fs::write(&old, "old").unwrap();
        fs::write(&new, "new").unwrap();
        // Nudge mtimes so ordering doesn't depend on write timing.
        let past = SystemTime::now() - std::time::Duration::from_secs(60);
        let file = fs::OpenOptions::new().write(true).open(&old).unwrap();
        file.set_modified(past).unwrap();

        assert_eq!(locate_latest(dir.path()).unwrap(), new);
    }
}
