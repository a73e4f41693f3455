//! Debounced search commit
//!
//! Keystrokes are held as a pending value with a deadline. Each new keystroke
//! replaces the pending value and re-arms the deadline, so only the last one
//! inside the delay window is committed. The caller supplies the clock.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending {
    text: String,
    deadline: Instant,
}

/// Timer handle for one search box
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    committed: String,
    pending: Option<Pending>,
}

impl SearchDebouncer {
    /// Create a debouncer whose committed value starts as `initial`
    #[must_use]
    pub fn new(delay: Duration, initial: impl Into<String>) -> Self {
        Self {
            delay,
            committed: initial.into(),
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Last committed search value
    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// What the search box shows: the pending value if any, else the committed one
    #[must_use]
    pub fn text(&self) -> &str {
        self.pending.as_ref().map_or(self.committed.as_str(), |p| p.text.as_str())
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be committed
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Record a keystroke, superseding any pending value
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        let deadline = now + self.delay;
        if let Some(previous) = self.pending.replace(Pending {
            text: text.into(),
            deadline,
        }) {
            tracing::trace!(superseded = %previous.text, "search input superseded");
        }
    }

    /// Commit the pending value if its deadline has passed
    ///
    /// Returns the newly committed value.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.flush(),
            _ => None,
        }
    }

    /// Commit the pending value now, ignoring the deadline
    pub fn flush(&mut self) -> Option<String> {
        let pending = self.pending.take()?;
        self.committed = pending.text;
        tracing::debug!(search = %self.committed, "search committed");
        Some(self.committed.clone())
    }

    /// Drop any pending value and commit the empty search immediately
    pub fn clear(&mut self) {
        self.pending = None;
        self.committed.clear();
    }

    /// Discard the pending value without committing it
    ///
    /// Returns `true` if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Align the committed value with a search set elsewhere, dropping any pending one
    pub fn reset(&mut self, committed: impl Into<String>) {
        self.pending = None;
        self.committed = committed.into();
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::trace!(discarded = %pending.text, "pending search discarded");
        }
    }
}
