//! The marker protocol
//!
//! A command injected into the remote shell produces output somewhere in a
//! continuous, interleaved stream. Bracketing it between unique sentinel
//! lines is what makes the span recoverable: [`markers`] derives the
//! sentinels, [`command`] waits for a single bracketed command, and
//! [`recording`] keeps a window open across calls. [`history`] shares the
//! same cleaned-transcript primitives to return a budgeted tail.

mod command;
mod history;
mod markers;
mod recording;

pub use command::CommandSynchronizer;
pub use history::HistoryRetriever;
pub use markers::{MarkerPair, END_RECORD_MARKER, START_RECORD_MARKER};
pub use recording::RecordingSession;

/// Join captured lines, dropping blank lines at the boundaries only.
///
/// The wrapper pads its markers with blank lines on purpose; interior
/// blanks belong to the command's real output and are preserved.
fn join_trimmed(lines: &[&str]) -> String {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_boundary_blanks_only() {
        let lines = ["", "  ", "a", "", "b", "", ""];
        assert_eq!(join_trimmed(&lines), "a\n\nb");
    }

    #[test]
    fn all_blank_yields_empty() {
        assert_eq!(join_trimmed(&["", "   ", ""]), "");
        assert_eq!(join_trimmed(&[]), "");
    }
}
