//! Terminal target selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Supported terminal products
///
/// Each target has to offer the two interfaces the engine relies on:
/// keystroke injection into a live pane, and a transcript log written as a
/// side effect of display (`tmux pipe-pane`, `screen -L`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalKind {
    /// A tmux pane
    Tmux,
    /// A GNU screen session
    Screen,
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tmux => write!(f, "tmux"),
            Self::Screen => write!(f, "screen"),
        }
    }
}

impl FromStr for TerminalKind {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tmux" => Ok(Self::Tmux),
            "screen" => Ok(Self::Screen),
            other => Err(BridgeError::UnsupportedTarget(other.to_string())),
        }
    }
}
