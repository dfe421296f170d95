//! Sentinel markers bracketing transcript spans

use uuid::Uuid;

/// Fixed marker opening a recording window
pub const START_RECORD_MARKER: &str = ">>>>>> Start Recording";

/// Fixed marker closing a recording window
pub const END_RECORD_MARKER: &str = ">>>>>> End Recording";

/// Unique start/end sentinel pair for one synchronization attempt.
///
/// Derived from a fresh random identifier, so two sequential runs can
/// never satisfy each other's waits. The marker text stays free of single
/// quotes and other characters the remote shell would interpret inside
/// the quoted `printf` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    /// Derive a fresh pair from a random 128-bit identifier
    pub fn generate() -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self::from_id(&id[..8])
    }

    fn from_id(id: &str) -> Self {
        Self {
            start: format!(">>>>>> Session {id} Start"),
            end: format!(">>>>>> Session {id} End"),
        }
    }

    /// Shell command that emits the start marker as its own line, runs
    /// `command` verbatim, then emits the end marker as its own line —
    /// whether or not `command` succeeded.
    ///
    /// The blank padding around the markers makes boundary trimming of the
    /// captured span deterministic.
    pub fn wrap(&self, command: &str) -> String {
        format!(
            "printf '%s\\n\\n' '{start}'; {command}; printf '\\n%s\\n' '{end}'",
            start = self.start,
            end = self.end,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_unique_per_invocation() {
        let a = MarkerPair::generate();
        let b = MarkerPair::generate();
        assert_ne!(a.start, b.start);
        assert_ne!(a.end, b.end);
    }

    #[test]
    fn start_and_end_differ() {
        let pair = MarkerPair::generate();
        assert_ne!(pair.start, pair.end);
    }

    #[test]
    fn markers_are_shell_safe() {
        let pair = MarkerPair::generate();
        for marker in [&pair.start, &pair.end] {
            assert!(!marker.contains('\''));
            assert!(!marker.contains('\\'));
            assert!(!marker.contains('\n'));
        }
    }

    #[test]
    fn wrap_runs_the_command_between_markers() {
        let pair = MarkerPair::from_id("abc123");
        let wrapped = pair.wrap("ls -la");
        let start_pos = wrapped.find(&pair.start).unwrap();
        let cmd_pos = wrapped.find("ls -la").unwrap();
        let end_pos = wrapped.find(&pair.end).unwrap();
        assert!(start_pos < cmd_pos && cmd_pos < end_pos);
        // command text must arrive verbatim, spaces included
        assert!(wrapped.contains("; ls -la;"));
    }

    #[test]
    fn wrap_emits_markers_unconditionally() {
        // Marker emission is sequenced with `;`, never `&&`, so a failing
        // command still closes the bracket.
        let wrapped = MarkerPair::from_id("ff00").wrap("false");
        assert!(!wrapped.contains("&&"));
    }
}
