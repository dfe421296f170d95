//! Shellbridge core library
//!
//! Drives an interactive shell that lives inside a third-party terminal
//! program by injecting keystrokes, and recovers the output of a single
//! injected command from the terminal's transcript log.
//!
//! The terminal is an opaque, asynchronous text-emitting device: it has no
//! request/response framing, echoes what is typed, and interleaves prompts
//! and banners with real output. The only observable side channel is the
//! transcript file the terminal itself keeps appending to. Everything in
//! this crate exists to turn that noisy stream back into per-command
//! results:
//!
//! - [`transcript`] — locating, tailing and cleaning the transcript file
//! - [`terminal`] — the keystroke-injection capability and its targets
//! - [`sync`] — the marker protocol: command bracketing, recording
//!   windows, and budgeted history retrieval
//! - [`session`] — the public surface tying the pieces together

pub mod config;
pub mod error;
pub mod session;
pub mod sync;
pub mod terminal;
pub mod text;
pub mod transcript;

pub use config::{BridgeConfig, TimingConfig};
pub use error::{BridgeError, BridgeResult};
pub use session::RemoteSession;
pub use terminal::{KeystrokeInjector, TerminalKind};
pub use transcript::TranscriptFile;
