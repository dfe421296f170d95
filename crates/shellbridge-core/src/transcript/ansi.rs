//! ANSI/VT100 escape sequence stripping
//!
//! Transcript files capture everything the terminal displayed, including
//! CSI color and cursor sequences of the form `ESC [ params intermediates
//! final`. All of them are removed before lines are matched or returned.

use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B\[[0-?]*[ -/]*[@-~]").expect("valid escape pattern"));

/// Remove all CSI escape sequences from `text`
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
