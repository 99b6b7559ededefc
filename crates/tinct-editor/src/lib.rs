#![forbid(unsafe_code)]

//! Stateful side of Tinct: the editor store and its collaborators.
//!
//! # Role in Tinct
//! `tinct-theme` turns a theme into outputs. This crate keeps the theme
//! that is being edited: undo history with coalescing, the checkpoint used
//! by presets and HSL sliders, and the handshake that mirrors the theme into
//! an embedded preview. Time is always an input, never read implicitly by
//! the state machines, so everything here is deterministic under test.
//!
//! # Key types
//! - [`ThemeEditor`]: owns the current [`ThemeEditorState`](tinct_theme::ThemeEditorState).
//! - [`History`]: bounded undo/redo stacks.
//! - [`EmbedSession`]: sans-IO preview handshake.
//! - [`EditorConfig`]: TOML/JSON configuration.

pub mod config;
pub mod debounce;
pub mod embed;
pub mod error;
pub mod history;
pub mod store;

pub use config::{EditorConfig, EmbedConfig, OutputConfig};
pub use debounce::Debouncer;
pub use embed::{EmbedAction, EmbedEvent, EmbedMessage, EmbedOrigin, EmbedSession, EmbedStatus};
pub use error::{ConfigError, ProtocolError};
pub use history::{History, HistoryConfig, HistoryEntry, Recorded};
pub use store::{SetOutcome, ThemeEditor};

/// Standard result type for configuration loading.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
