//! Reference software-timer service backed by an all-atomic slot pool

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use crate::hal::{DispatchError, Duration, Instant, TimerService};
use crate::types::{TimerMode, TimerSlot};

/// Fixed pool of software timer slots.
///
/// Const-initializable, so it can live in a `static` and be armed straight
/// from interrupt context: `start` is a single atomic store. Expiries are
/// delivered by [`poll_due`](SoftTimer::poll_due), which the platform calls
/// from its timer tick context.
///
/// Deadlines are absolute milliseconds since boot, stored offset by one so
/// zero means idle; the clock wraps after ~49 days, well past any debounce
/// window.
pub struct SoftTimer<const SLOTS: usize> {
    enabled: AtomicBool,
    claimed: AtomicUsize,
    deadlines: [AtomicU32; SLOTS],
    periods: [AtomicU32; SLOTS],
    periodic: [AtomicBool; SLOTS],
}

impl<const SLOTS: usize> SoftTimer<SLOTS> {
    const IDLE: AtomicU32 = AtomicU32::new(0);
    const ONE_SHOT: AtomicBool = AtomicBool::new(false);

    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            claimed: AtomicUsize::new(0),
            deadlines: [Self::IDLE; SLOTS],
            periods: [Self::IDLE; SLOTS],
            periodic: [Self::ONE_SHOT; SLOTS],
        }
    }

    /// Number of slots claimed so far
    pub fn claimed(&self) -> usize {
        self.claimed.load(Ordering::Relaxed).min(SLOTS)
    }

    /// True if the slot is armed and has not yet fired
    pub fn armed(&self, slot: TimerSlot) -> bool {
        slot.index() < SLOTS && self.deadlines[slot.index()].load(Ordering::Relaxed) != 0
    }

    /// Fire every claimed slot whose deadline has passed.
    ///
    /// A slot restarted between the deadline load and the exchange keeps its
    /// new deadline and does not fire; periodic slots re-arm themselves by
    /// their last programmed period. Does nothing until the service is
    /// enabled.
    pub fn poll_due(&self, now: Instant, mut fire: impl FnMut(TimerSlot)) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }

        let now_ms = now.as_millis() as u32;
        for index in 0..self.claimed() {
            let deadline = self.deadlines[index].load(Ordering::Relaxed);
            if deadline == 0 || now_ms < deadline - 1 {
                continue;
            }

            let next = if self.periodic[index].load(Ordering::Relaxed) {
                deadline.wrapping_add(self.periods[index].load(Ordering::Relaxed))
            } else {
                0
            };
            if self.deadlines[index]
                .compare_exchange(deadline, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                fire(TimerSlot::from_index(index as u8));
            }
        }
    }
}

impl<const SLOTS: usize> Default for SoftTimer<SLOTS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SLOTS: usize> TimerService for SoftTimer<SLOTS> {
    fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    fn claim(&self, mode: TimerMode) -> Result<TimerSlot, DispatchError> {
        let index = self.claimed.fetch_add(1, Ordering::Relaxed);
        if index >= SLOTS {
            return Err(DispatchError::TimerExhausted);
        }
        self.periodic[index].store(mode.reloads(), Ordering::Relaxed);
        Ok(TimerSlot::from_index(index as u8))
    }

    fn start(&self, slot: TimerSlot, delay: Duration) {
        if slot.index() >= SLOTS {
            return;
        }
        let delay_ms = delay.as_millis() as u32;
        let deadline = (Instant::now().as_millis() as u32)
            .wrapping_add(delay_ms)
            .wrapping_add(1);
        self.periods[slot.index()].store(delay_ms, Ordering::Relaxed);
        self.deadlines[slot.index()].store(deadline, Ordering::Relaxed);
    }
}
