//! Redraw scheduling.
//!
//! Mutations mark the scene dirty; the host drains the flag once per
//! tick. Any number of mutations between two drains produce exactly one
//! redraw, which is the only batching in the system.

/// Dirty-flag redraw scheduler.
///
/// Single-owner mutable state: the interaction controller requests,
/// the host drains. No locking is needed because everything runs on one
/// logical thread of control.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedrawScheduler {
    dirty: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the scene dirty.
    pub fn request(&mut self) {
        self.dirty = true;
    }

    /// Whether a redraw is currently pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drain the flag. Returns `true` at most once per batch of
    /// requests.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
