//! Shared event-flag register

use core::sync::atomic::{AtomicU32, Ordering};

use crate::types::MAX_SOURCES;

/// One pending-event bit per source index.
///
/// Bit i is 1 iff source i's debounced event is pending dispatch and has not
/// been handled yet. Producers (timer expiries, edge interrupts when used as
/// a raw-edge latch) raise bits; the dispatch loop clears them. Every
/// mutation is a single-word atomic read-modify-write, so producers may
/// preempt the consumer at any point without losing an update.
///
/// Safe to place in a `static`; all methods take `&self`.
pub struct EventFlags(AtomicU32);

impl EventFlags {
    /// Create an empty flag register
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Raise the bit for `source`. Out-of-range indices are ignored.
    pub fn raise(&self, source: usize) {
        if source >= MAX_SOURCES {
            return;
        }
        self.0.fetch_or(1 << source, Ordering::Relaxed);
    }

    /// Clear the bit for `source`. Out-of-range indices are ignored.
    pub fn clear(&self, source: usize) {
        if source >= MAX_SOURCES {
            return;
        }
        self.0.fetch_and(!(1 << source), Ordering::Relaxed);
    }

    /// Check a single bit
    pub fn is_raised(&self, source: usize) -> bool {
        if source >= MAX_SOURCES {
            return false;
        }
        self.0.load(Ordering::Relaxed) & (1 << source) != 0
    }

    /// True if any bit is raised
    pub fn any(&self) -> bool {
        self.0.load(Ordering::Relaxed) != 0
    }

    /// Current register value. Bits raised after the snapshot is taken are
    /// not reflected in it.
    pub fn snapshot(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    /// Atomically read and empty the whole register.
    ///
    /// Drain semantics for latch use (raw edges signaled from interrupt
    /// context, collected by a polling task); the dispatch loop itself uses
    /// [`snapshot`](EventFlags::snapshot) + per-bit
    /// [`clear`](EventFlags::clear) instead.
    pub fn take_all(&self) -> u32 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}
