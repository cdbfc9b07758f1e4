//! Debounce controller: raw edges in, debounced flag bits out

use crate::flags::EventFlags;
use crate::hal::{DispatchError, Duration, TimerService};
use crate::types::{DispatchConfig, TimerMode, TimerSlot, MAX_SOURCES};

/// Owns one one-shot timer slot per event source.
///
/// Raw edges (re)start the source's slot; only an undisturbed expiry raises
/// the source's flag bit, so bounce inside the window schedules instead of
/// triggering and a genuine press yields exactly one flag-set.
pub struct DebounceController<'a, T: TimerService, const N: usize> {
    timer: &'a T,
    flags: &'a EventFlags,
    slots: [TimerSlot; N],
    delay: Duration,
}

impl<'a, T: TimerService, const N: usize> DebounceController<'a, T, N> {
    /// Claim one slot per source and bind the controller to its flag
    /// register.
    ///
    /// Slot exhaustion is a static configuration error; it must be surfaced
    /// before the dispatch loop is entered.
    pub fn bind(
        timer: &'a T,
        flags: &'a EventFlags,
        config: &DispatchConfig,
    ) -> Result<Self, DispatchError> {
        if N > MAX_SOURCES {
            return Err(DispatchError::InvalidConfig);
        }

        let mut slots = [TimerSlot::from_index(0); N];
        for slot in slots.iter_mut() {
            *slot = timer.claim(TimerMode::OneShot)?;
        }

        Ok(Self {
            timer,
            flags,
            slots,
            delay: config.debounce,
        })
    }

    /// Raw transition on `source`, called from interrupt context.
    ///
    /// (Re)starts the source's debounce slot; rapid repeated edges extend
    /// the window rather than firing twice. Never blocks, never locks.
    /// Out-of-range indices are a silent no-op.
    pub fn on_edge(&self, source: usize) {
        if source >= N {
            #[cfg(feature = "defmt")]
            defmt::warn!("edge for unknown source {}", source);
            return;
        }
        self.timer.start(self.slots[source], self.delay);
    }

    /// Debounce window elapsed for `slot`, called from timer-expiry context.
    ///
    /// Sole producer of flag bits. Expiries for slots the controller does
    /// not own are ignored.
    pub fn on_expired(&self, slot: TimerSlot) {
        if let Some(source) = self.slots.iter().position(|s| *s == slot) {
            self.flags.raise(source);
        }
    }

    /// Slot bound to `source`, for platform wiring
    pub fn slot(&self, source: usize) -> Option<TimerSlot> {
        self.slots.get(source).copied()
    }

    /// Configured debounce window
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
