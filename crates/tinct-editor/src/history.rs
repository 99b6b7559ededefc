#![forbid(unsafe_code)]

//! Bounded undo/redo history with time-window coalescing.
//!
//! [`History`] stores whole snapshots of the previous state rather than
//! reversible commands: a theme is small and every edit replaces it.
//!
//! ```text
//! record(s0) at t=0     past: [s0@0]            future: []
//! record(s1) at t=200   past: [s0@0]            future: []   (coalesced)
//! record(s2) at t=900   past: [s0@0, s2@900]    future: []
//! step_back(s3)         past: [s0@0]            future: [s3]
//! ```
//!
//! # Invariants
//!
//! 1. `past.len() <= max_entries` and `future.len() <= max_entries`.
//! 2. Eviction drops the oldest entry first.
//! 3. A recorded (non-coalesced) write clears `future`.
//! 4. A coalesced write touches neither stack.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

/// Limits of the undo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum entries kept on each stack.
    pub max_entries: usize,
    /// Writes closer than this to the newest entry are merged into it.
    pub coalesce_window_ms: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: 30,
            coalesce_window_ms: 500,
        }
    }
}

impl HistoryConfig {
    #[must_use]
    pub fn new(max_entries: usize, coalesce_window_ms: u64) -> Self {
        Self {
            max_entries,
            coalesce_window_ms,
        }
    }

    #[must_use]
    pub fn coalesce_window(&self) -> Duration {
        Duration::from_millis(self.coalesce_window_ms)
    }
}

/// A snapshot and the time it entered the history.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<T> {
    pub state: T,
    pub timestamp: Instant,
}

/// What [`History::record`] did with a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// The previous state was pushed and redo cleared.
    Pushed,
    /// The write fell inside the coalescing window; nothing was stored.
    Coalesced,
}

pub struct History<T> {
    past: VecDeque<HistoryEntry<T>>,
    future: VecDeque<HistoryEntry<T>>,
    config: HistoryConfig,
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("past", &self.past.len())
            .field("future", &self.future.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<T> History<T> {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            past: VecDeque::new(),
            future: VecDeque::new(),
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Record `previous` as the state replaced by an edit at `now`.
    pub fn record(&mut self, previous: T, now: Instant) -> Recorded {
        let window = self.config.coalesce_window();
        if let Some(newest) = self.past.back()
            && now.saturating_duration_since(newest.timestamp) < window
        {
            tracing::debug!(depth = self.past.len(), "history write coalesced");
            return Recorded::Coalesced;
        }
        self.push(previous, now);
        Recorded::Pushed
    }

    /// Push unconditionally and clear redo.
    pub fn push(&mut self, previous: T, now: Instant) {
        self.future.clear();
        self.past.push_back(HistoryEntry {
            state: previous,
            timestamp: now,
        });
        Self::enforce_depth(&mut self.past, self.config.max_entries, Side::Front);
        tracing::debug!(depth = self.past.len(), "history entry pushed");
    }

    /// Undo one step: stash `present` for redo and return the newest past
    /// state.
    pub fn step_back(&mut self, present: T, now: Instant) -> Option<T> {
        let entry = self.past.pop_back()?;
        self.future.push_front(HistoryEntry {
            state: present,
            timestamp: now,
        });
        Self::enforce_depth(&mut self.future, self.config.max_entries, Side::Back);
        Some(entry.state)
    }

    /// Redo one step: stash `present` for undo and return the most recently
    /// undone state.
    pub fn step_forward(&mut self, present: T, now: Instant) -> Option<T> {
        let entry = self.future.pop_front()?;
        self.past.push_back(HistoryEntry {
            state: present,
            timestamp: now,
        });
        Self::enforce_depth(&mut self.past, self.config.max_entries, Side::Front);
        Some(entry.state)
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Entries available for undo, oldest first.
    pub fn past(&self) -> impl Iterator<Item = &HistoryEntry<T>> {
        self.past.iter()
    }

    /// Entries available for redo, next redo first.
    pub fn future(&self) -> impl Iterator<Item = &HistoryEntry<T>> {
        self.future.iter()
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Replace the limits, evicting entries that no longer fit.
    pub fn set_config(&mut self, config: HistoryConfig) {
        self.config = config;
        Self::enforce_depth(&mut self.past, self.config.max_entries, Side::Front);
        Self::enforce_depth(&mut self.future, self.config.max_entries, Side::Back);
    }

    // ====================================================================
    // Internal
    // ====================================================================

    /// `Front` evicts from the oldest end of `past`; `Back` from the far
    /// end of `future`.
    fn enforce_depth(stack: &mut VecDeque<HistoryEntry<T>>, max: usize, side: Side) {
        while stack.len() > max {
            match side {
                Side::Front => stack.pop_front(),
                Side::Back => stack.pop_back(),
            };
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Front,
    Back,
}
