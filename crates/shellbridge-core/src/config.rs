//! Configuration for shellbridge sessions
//!
//! Everything the engine needs is carried in an explicit [`BridgeConfig`]
//! value passed into constructors — there is no ambient global state, so
//! the synchronization logic stays testable without environment setup.
//! Values are loaded from a TOML file (defaulting to the user config dir)
//! and can be overridden through `SHELLBRIDGE_*` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};
use crate::terminal::TerminalKind;

/// Default wait budget for one command's output, in seconds
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 60;

/// Default history budget, in measurement units (approximate tokens)
pub const DEFAULT_HISTORY_BUDGET: usize = 1024;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Which terminal target receives the keystrokes
    pub target: TerminalKind,
    /// tmux target settings
    pub tmux: TmuxConfig,
    /// GNU screen target settings
    pub screen: ScreenConfig,
    /// Poll intervals and settle delays
    pub timing: TimingConfig,
    /// Default wait budget for `run_command`, in seconds
    pub command_timeout_secs: u64,
    /// Default budget for `get_history`, in measurement units
    pub history_budget: usize,
    /// Where recorded procedures are persisted (unset disables persistence)
    pub procedure_dir: Option<PathBuf>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            target: TerminalKind::Tmux,
            tmux: TmuxConfig::default(),
            screen: ScreenConfig::default(),
            timing: TimingConfig::default(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            history_budget: DEFAULT_HISTORY_BUDGET,
            procedure_dir: None,
        }
    }
}

/// Settings for a tmux pane target
///
/// The pane must have transcript logging enabled (`tmux pipe-pane`) into
/// `log_dir` for synchronization to observe anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TmuxConfig {
    /// Pane the keystrokes are delivered to, in tmux target syntax
    pub pane: String,
    /// Directory the pane's transcript log is written into
    pub log_dir: Option<PathBuf>,
}

impl Default for TmuxConfig {
    fn default() -> Self {
        Self {
            pane: "0".to_string(),
            log_dir: None,
        }
    }
}

/// Settings for a GNU screen session target
///
/// The session must run with logging (`screen -L`) into `log_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    /// Session name the keystrokes are delivered to
    pub session: String,
    /// Directory the session's screenlog is written into
    pub log_dir: Option<PathBuf>,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            session: "shellbridge".to_string(),
            log_dir: None,
        }
    }
}

/// Poll intervals and settle delays used by the engine
///
/// Tail polling is tens of milliseconds (cheap reads of an already-open
/// file); marker-scan polling is hundreds of milliseconds so waiting does
/// not busy-spin while still adding sub-second latency at worst.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Sleep between unsuccessful transcript reads, in milliseconds
    pub tail_poll_ms: u64,
    /// Sleep between marker scans while waiting for output, in milliseconds
    pub sync_poll_ms: u64,
    /// Wait after a wake or stop-marker injection before reading, in milliseconds
    pub settle_ms: u64,
    /// Bounded wait for the tailer thread to exit on stop, in milliseconds
    pub join_wait_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tail_poll_ms: 50,
            sync_poll_ms: 300,
            settle_ms: 200,
            join_wait_ms: 1000,
        }
    }
}

impl TimingConfig {
    pub fn tail_poll(&self) -> Duration {
        Duration::from_millis(self.tail_poll_ms)
    }

    pub fn sync_poll(&self) -> Duration {
        Duration::from_millis(self.sync_poll_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn join_wait(&self) -> Duration {
        Duration::from_millis(self.join_wait_ms)
    }
}

impl BridgeConfig {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`, then apply environment overrides.
    ///
    /// A missing explicit `path` is an error; a missing default file is
    /// not (built-in defaults apply).
    pub fn load(path: Option<&Path>) -> BridgeResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::default_path() {
                Some(p) if p.is_file() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> BridgeResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| BridgeError::config(format!("{}: {e}", path.display())))
    }

    /// Default config file location under the user config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("shellbridge").join("config.toml"))
    }

    /// Apply `SHELLBRIDGE_*` environment variable overrides
    pub fn apply_env(&mut self) -> BridgeResult<()> {
        if let Ok(target) = std::env::var("SHELLBRIDGE_TARGET") {
            self.target = target.parse()?;
        }
        if let Ok(pane) = std::env::var("SHELLBRIDGE_TMUX_PANE") {
            self.tmux.pane = pane;
        }
        if let Ok(dir) = std::env::var("SHELLBRIDGE_TMUX_LOG_DIR") {
            self.tmux.log_dir = Some(PathBuf::from(dir));
        }
        if let Ok(session) = std::env::var("SHELLBRIDGE_SCREEN_SESSION") {
            self.screen.session = session;
        }
        if let Ok(dir) = std::env::var("SHELLBRIDGE_SCREEN_LOG_DIR") {
            self.screen.log_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Log directory of the active target, tilde-expanded.
    ///
    /// Fails fast when the active target has no log directory configured —
    /// without one there is nothing to synchronize against.
    pub fn log_dir(&self) -> BridgeResult<PathBuf> {
        let dir = match self.target {
            TerminalKind::Tmux => self.tmux.log_dir.as_ref(),
            TerminalKind::Screen => self.screen.log_dir.as_ref(),
        };
        dir.map(|p| expand_tilde(p)).ok_or_else(|| {
            BridgeError::config(format!("{}.log_dir is not set", self.target))
        })
    }

    /// Identifier of the active target (tmux pane or screen session name)
    pub fn target_id(&self) -> &str {
        match self.target {
            TerminalKind::Tmux => &self.tmux.pane,
            TerminalKind::Screen => &self.screen.session,
        }
    }

    /// Default command wait budget as a `Duration`
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Procedure store directory, tilde-expanded
    pub fn procedure_dir(&self) -> Option<PathBuf> {
        self.procedure_dir.as_ref().map(|p| expand_tilde(p))
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
