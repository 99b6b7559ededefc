#![forbid(unsafe_code)]

//! Live preview of a theme inside an embedded site.
//!
//! # Wire format
//!
//! Messages are JSON objects `{ "type": "...", "payload": { ... } }`;
//! payload-less messages omit `payload`.
//!
//! # Handshake
//!
//! ```text
//!            start / EMBED_LOADED
//! Unknown ─────────────────────────▶ Checking ──── 3 s, no PONG ───▶ Missing
//!                                        │
//!                                      PONG  (editor sends CHECK_SHADCN)
//!                                        ▼
//!                                    Connected ── SHADCN_STATUS false ─▶ Unsupported
//!                                        │
//!                               SHADCN_STATUS true
//!                                        ▼
//!                                    Supported   (THEME_UPDATE posts flow)
//!
//! EMBED_ERROR from Checking/Connected/Supported/Unsupported ─▶ Error
//! ```
//!
//! A same-origin preview skips the handshake: the session reports
//! `Supported` at once and every theme change is applied directly.
//! Cross-origin `THEME_UPDATE` posts are debounced.
//!
//! [`EmbedSession`] never touches a window or a clock. It consumes messages
//! and timestamps and returns [`EmbedAction`]s for the host to carry out.

use serde::{Deserialize, Serialize};
use tinct_theme::ThemeEditorState;
use web_time::Instant;

use crate::config::EmbedConfig;
use crate::debounce::Debouncer;
use crate::error::ProtocolError;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum EmbedMessage {
    Ping,
    Pong,
    CheckShadcn,
    ShadcnStatus { supported: bool },
    ThemeUpdate { theme_state: Box<ThemeEditorState> },
    EmbedLoaded,
    EmbedError { error: String },
}

impl EmbedMessage {
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn theme_update(state: ThemeEditorState) -> Self {
        Self::ThemeUpdate {
            theme_state: Box::new(state),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ping => "PING",
            Self::Pong => "PONG",
            Self::CheckShadcn => "CHECK_SHADCN",
            Self::ShadcnStatus { .. } => "SHADCN_STATUS",
            Self::ThemeUpdate { .. } => "THEME_UPDATE",
            Self::EmbedLoaded => "EMBED_LOADED",
            Self::EmbedError { .. } => "EMBED_ERROR",
        }
    }
}

// ---------------------------------------------------------------------------
// Status machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedStatus {
    #[default]
    Unknown,
    Checking,
    Connected,
    Supported,
    Unsupported,
    Missing,
    Error,
}

/// Inputs of the status machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedEvent {
    /// A `PING` was sent.
    HandshakeStarted,
    PongReceived,
    ShadcnReported { supported: bool },
    HandshakeTimedOut,
    ErrorReported,
    /// The preview shares the editor's origin.
    SameOrigin,
    Reset,
}

impl EmbedStatus {
    /// The status after `event`, or `None` when the event is not valid here.
    #[must_use]
    pub const fn transition(self, event: EmbedEvent) -> Option<Self> {
        use EmbedEvent as E;
        match (self, event) {
            (_, E::Reset) => Some(Self::Unknown),
            (_, E::SameOrigin) => Some(Self::Supported),
            (Self::Checking, E::HandshakeStarted) => None,
            (_, E::HandshakeStarted) => Some(Self::Checking),
            (Self::Checking, E::PongReceived) => Some(Self::Connected),
            (Self::Checking, E::HandshakeTimedOut) => Some(Self::Missing),
            (Self::Connected, E::ShadcnReported { supported: true }) => Some(Self::Supported),
            (Self::Connected, E::ShadcnReported { supported: false }) => Some(Self::Unsupported),
            (
                Self::Checking | Self::Connected | Self::Supported | Self::Unsupported,
                E::ErrorReported,
            ) => Some(Self::Error),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Checking => "checking",
            Self::Connected => "connected",
            Self::Supported => "supported",
            Self::Unsupported => "unsupported",
            Self::Missing => "missing",
            Self::Error => "error",
        }
    }

    /// No further handshake messages are expected.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(
            self,
            Self::Supported | Self::Unsupported | Self::Missing | Self::Error
        )
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmbedOrigin {
    SameOrigin,
    #[default]
    CrossOrigin,
}

/// Side effects the host must perform.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedAction {
    /// `postMessage` this to the preview.
    Post(EmbedMessage),
    /// Write this state straight onto the preview document.
    Apply(Box<ThemeEditorState>),
}

#[derive(Debug)]
pub struct EmbedSession {
    origin: EmbedOrigin,
    status: EmbedStatus,
    config: EmbedConfig,
    handshake_deadline: Option<Instant>,
    outbox: Debouncer<ThemeEditorState>,
    latest: Option<ThemeEditorState>,
    last_error: Option<String>,
}

impl EmbedSession {
    #[must_use]
    pub fn new(origin: EmbedOrigin, config: EmbedConfig) -> Self {
        let outbox = Debouncer::new(config.post_debounce());
        Self {
            origin,
            status: EmbedStatus::Unknown,
            config,
            handshake_deadline: None,
            outbox,
            latest: None,
            last_error: None,
        }
    }

    #[must_use]
    pub fn status(&self) -> EmbedStatus {
        self.status
    }

    #[must_use]
    pub fn origin(&self) -> EmbedOrigin {
        self.origin
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When [`tick`](Self::tick) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.handshake_deadline, self.outbox.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Begin talking to a freshly mounted preview showing `state`.
    pub fn start(&mut self, state: &ThemeEditorState, now: Instant) -> Vec<EmbedAction> {
        self.latest = Some(state.clone());
        match self.origin {
            EmbedOrigin::SameOrigin => {
                self.fire(EmbedEvent::SameOrigin);
                vec![EmbedAction::Apply(Box::new(state.clone()))]
            }
            EmbedOrigin::CrossOrigin => self.begin_handshake(now),
        }
    }

    /// Forget everything and return to `Unknown`.
    pub fn reset(&mut self) {
        self.fire(EmbedEvent::Reset);
        self.handshake_deadline = None;
        self.outbox.cancel();
        self.last_error = None;
    }

    /// Decode and handle a raw message.
    pub fn receive_json(&mut self, json: &str, now: Instant) -> Result<Vec<EmbedAction>, ProtocolError> {
        let message = EmbedMessage::from_json(json)?;
        Ok(self.receive(message, now))
    }

    /// Handle a message posted by the preview.
    pub fn receive(&mut self, message: EmbedMessage, now: Instant) -> Vec<EmbedAction> {
        match message {
            EmbedMessage::Pong => {
                if self.fire(EmbedEvent::PongReceived) {
                    self.handshake_deadline = None;
                    return vec![EmbedAction::Post(EmbedMessage::CheckShadcn)];
                }
                Vec::new()
            }
            EmbedMessage::ShadcnStatus { supported } => {
                if self.fire(EmbedEvent::ShadcnReported { supported })
                    && self.status == EmbedStatus::Supported
                    && let Some(state) = self.latest.clone()
                {
                    self.outbox.cancel();
                    return vec![EmbedAction::Post(EmbedMessage::theme_update(state))];
                }
                Vec::new()
            }
            EmbedMessage::EmbedLoaded => match self.origin {
                EmbedOrigin::CrossOrigin => self.begin_handshake(now),
                EmbedOrigin::SameOrigin => self
                    .latest
                    .clone()
                    .map(|state| vec![EmbedAction::Apply(Box::new(state))])
                    .unwrap_or_default(),
            },
            EmbedMessage::EmbedError { error } => {
                tracing::warn!(%error, status = ?self.status, "preview reported an error");
                if self.fire(EmbedEvent::ErrorReported) {
                    self.handshake_deadline = None;
                    self.outbox.cancel();
                    self.last_error = Some(error);
                }
                Vec::new()
            }
            other => {
                tracing::debug!(kind = other.kind(), "ignoring editor-bound message");
                Vec::new()
            }
        }
    }

    /// Advance timers: the handshake timeout and debounced posts.
    pub fn tick(&mut self, now: Instant) -> Vec<EmbedAction> {
        let mut actions = Vec::new();
        if let Some(deadline) = self.handshake_deadline
            && deadline <= now
        {
            self.handshake_deadline = None;
            self.fire(EmbedEvent::HandshakeTimedOut);
        }
        if let Some(state) = self.outbox.poll(now) {
            if self.status == EmbedStatus::Supported {
                actions.push(EmbedAction::Post(EmbedMessage::theme_update(state)));
            } else {
                tracing::debug!(status = ?self.status, "dropping theme post, preview not ready");
            }
        }
        actions
    }

    /// The editor state changed.
    pub fn theme_changed(&mut self, state: &ThemeEditorState, now: Instant) -> Vec<EmbedAction> {
        self.latest = Some(state.clone());
        match self.origin {
            EmbedOrigin::SameOrigin => vec![EmbedAction::Apply(Box::new(state.clone()))],
            EmbedOrigin::CrossOrigin => {
                if self.status == EmbedStatus::Supported {
                    self.outbox.push(state.clone(), now);
                }
                Vec::new()
            }
        }
    }

    /// Text for the preview status banner. `None` once the preview works.
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        let message = match self.status {
            EmbedStatus::Unknown | EmbedStatus::Supported => return None,
            EmbedStatus::Checking => "Connecting to the preview...".to_string(),
            EmbedStatus::Connected => "Connected. Checking for shadcn/ui variables...".to_string(),
            EmbedStatus::Unsupported => {
                "This site does not use shadcn/ui CSS variables, so themes cannot be previewed."
                    .to_string()
            }
            EmbedStatus::Missing => {
                "The embed script was not found. Add it to your site and reload the preview."
                    .to_string()
            }
            EmbedStatus::Error => match &self.last_error {
                Some(error) => format!("The preview reported an error: {error}"),
                None => "The preview reported an error.".to_string(),
            },
        };
        Some(message)
    }

    fn begin_handshake(&mut self, now: Instant) -> Vec<EmbedAction> {
        self.last_error = None;
        self.outbox.cancel();
        if !self.fire(EmbedEvent::HandshakeStarted) {
            return Vec::new();
        }
        self.handshake_deadline = Some(now + self.config.handshake_timeout());
        vec![EmbedAction::Post(EmbedMessage::Ping)]
    }

    /// Apply `event`; returns whether the status changed.
    fn fire(&mut self, event: EmbedEvent) -> bool {
        match self.status.transition(event) {
            Some(next) => {
                tracing::debug!(from = ?self.status, to = ?next, ?event, "embed status");
                self.status = next;
                true
            }
            None => {
                tracing::debug!(status = ?self.status, ?event, "embed event ignored");
                false
            }
        }
    }
}
