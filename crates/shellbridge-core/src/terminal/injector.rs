//! Keystroke delivery into the live terminal program

use std::process::Command;

use tracing::debug;

use crate::error::{BridgeError, BridgeResult};
use crate::terminal::TerminalKind;

/// Delivers literal text plus a submit action to the target terminal.
///
/// Fire-and-forget: `Ok` means the keystrokes were handed to the terminal
/// program, never that the remote shell received them — no acknowledgement
/// channel exists. The submit action is always distinct from the text
/// itself, so spaces and shell syntax arrive verbatim.
#[cfg_attr(test, mockall::automock)]
pub trait KeystrokeInjector: Send + Sync {
    /// Send `text` verbatim, then submit it
    fn inject(&self, text: &str) -> BridgeResult<()>;

    /// Send a bare submit to wake a dozing session
    fn activate(&self) -> BridgeResult<()>;
}

/// Injects into a tmux pane via `tmux send-keys`
///
/// `-l` sends the text literally (no key-name lookup), and the Enter key
/// goes in a separate call so the text itself is never reinterpreted.
pub struct TmuxInjector {
    pane: String,
}

impl TmuxInjector {
    pub fn new(pane: impl Into<String>) -> Self {
        Self { pane: pane.into() }
    }
}

impl KeystrokeInjector for TmuxInjector {
    fn inject(&self, text: &str) -> BridgeResult<()> {
        run_injection("tmux", &["send-keys", "-t", &self.pane, "-l", "--", text])?;
        self.activate()
    }

    fn activate(&self) -> BridgeResult<()> {
        run_injection("tmux", &["send-keys", "-t", &self.pane, "Enter"])
    }
}

/// Injects into a GNU screen session via `screen -X stuff`
pub struct ScreenInjector {
    session: String,
}

impl ScreenInjector {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
        }
    }

    fn stuff(&self, text: &str) -> BridgeResult<()> {
        run_injection(
            "screen",
            &["-S", &self.session, "-p", "0", "-X", "stuff", text],
        )
    }
}

impl KeystrokeInjector for ScreenInjector {
    fn inject(&self, text: &str) -> BridgeResult<()> {
        self.stuff(text)?;
        self.activate()
    }

    fn activate(&self) -> BridgeResult<()> {
        self.stuff("\r")
    }
}

/// Build the injector for a configured target
pub fn injector_for(kind: TerminalKind, id: &str) -> Box<dyn KeystrokeInjector> {
    match kind {
        TerminalKind::Tmux => Box::new(TmuxInjector::new(id)),
        TerminalKind::Screen => Box::new(ScreenInjector::new(id)),
    }
}

fn run_injection(program: &str, args: &[&str]) -> BridgeResult<()> {
    debug!(program, ?args, "injecting keystrokes");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| BridgeError::injection(format!("failed to run {program}: {e}")))?;
    if !status.success() {
        return Err(BridgeError::injection(format!(
            "{program} exited with {status}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_binary_surfaces_as_injection_error() {
        let err = run_injection("shellbridge-no-such-binary", &["x"]).unwrap_err();
        assert!(matches!(err, BridgeError::Injection(_)));
    }

    #[test]
    fn builds_injector_per_target() {
        // Smoke test that the factory covers every variant.
        for kind in [TerminalKind::Tmux, TerminalKind::Screen] {
            let _ = injector_for(kind, "0");
        }
    }
}
