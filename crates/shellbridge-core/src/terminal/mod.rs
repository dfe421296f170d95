//! Terminal targets and keystroke injection
//!
//! The terminal program is an external collaborator: this module only
//! delivers literal text plus a submit action to it, and never learns
//! whether the remote shell actually received anything. Target products
//! are modeled as a capability interface selected by configuration; the
//! synchronization core never branches on the concrete target.

mod injector;
mod target;

pub use injector::{injector_for, KeystrokeInjector, ScreenInjector, TmuxInjector};
#[cfg(test)]
pub use injector::MockKeystrokeInjector;
pub use target::TerminalKind;
