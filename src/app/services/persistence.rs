//! Durable storage of the current draft.
//!
//! Saving never fails from the caller's point of view. A storage error is
//! logged and the adapter marks itself degraded; editing carries on in memory
//! and the next successful save clears the flag.

use std::time::{Duration, Instant};

use crate::app::infrastructure::storage::KeyValueStore;

/// The single slot holding the draft text.
pub const DRAFT_KEY: &str = "markdown";

pub struct DraftPersistence<S: KeyValueStore> {
    store: S,
    debounce: Duration,
    /// Text waiting for the debounce delay, with the time of the last edit.
    pending: Option<(String, Instant)>,
    degraded: bool,
}

impl<S: KeyValueStore> DraftPersistence<S> {
    /// Save on every call to [`record`](Self::record).
    pub fn new(store: S) -> Self {
        Self::with_debounce(store, Duration::ZERO)
    }

    pub fn with_debounce(store: S, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            pending: None,
            degraded: false,
        }
    }

    pub fn load(&self) -> Option<String> {
        match self.store.get(DRAFT_KEY) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Could not load saved draft: {}", e);
                None
            }
        }
    }

    /// Write `text` to the slot right away.
    pub fn save(&mut self, text: &str) {
        self.pending = None;
        match self.store.set(DRAFT_KEY, text) {
            Ok(()) => {
                if self.degraded {
                    tracing::info!("Draft storage recovered");
                }
                self.degraded = false;
            }
            Err(e) => {
                tracing::warn!("Could not save draft, keeping it in memory only: {}", e);
                self.degraded = true;
            }
        }
    }

    /// Note a mutation. Saves immediately when there is no debounce delay.
    pub fn record(&mut self, text: &str, now: Instant) {
        if self.debounce.is_zero() {
            self.save(text);
        } else {
            self.pending = Some((text.to_string(), now));
        }
    }

    /// Save the pending text once the delay has passed since the last edit.
    /// Returns whether a save happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match &self.pending {
            Some((_, since)) => now.saturating_duration_since(*since) >= self.debounce,
            None => false,
        };
        if due {
            self.flush();
        }
        due
    }

    /// Save the pending text, if any, regardless of the delay.
    pub fn flush(&mut self) {
        if let Some((text, _)) = self.pending.take() {
            self.save(&text);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}
