//! Hardware abstraction seams: time types, errors, and the software-timer
//! interface consumed by the debounce controller

// Re-export time types based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
pub use self::mock_time::{Duration, Instant};

#[cfg(not(feature = "embassy-time"))]
mod mock_time {
    /// Mock instant type for compilation without embassy-time
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Instant(u64);

    impl Instant {
        pub fn now() -> Self {
            Self(0) // Placeholder implementation
        }

        pub fn from_millis(ms: i64) -> Self {
            Self(ms as u64)
        }

        pub fn duration_since(&self, other: Instant) -> Duration {
            Duration::from_millis(self.0.saturating_sub(other.0))
        }

        pub fn as_millis(&self) -> u64 {
            self.0
        }
    }

    /// Mock duration type
    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct Duration(u64);

    impl Duration {
        pub fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub fn as_millis(&self) -> u64 {
            self.0
        }
    }

    impl core::ops::Div<u32> for Duration {
        type Output = Duration;

        fn div(self, rhs: u32) -> Duration {
            Duration(self.0 / rhs as u64)
        }
    }

    impl core::ops::Mul<u32> for Duration {
        type Output = Duration;

        fn mul(self, rhs: u32) -> Duration {
            Duration(self.0 * rhs as u64)
        }
    }
}

use crate::types::{TimerMode, TimerSlot};

/// Error types for dispatcher setup
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Timer service has no free slot left
    TimerExhausted,
    /// Invalid configuration
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DispatchError::TimerExhausted => write!(f, "no free timer slot"),
            DispatchError::InvalidConfig => write!(f, "invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DispatchError {}

/// Interface of the software-timer collaborator.
///
/// All methods take `&self` and must be callable from interrupt context:
/// implementations use single-word atomics, never locks.
pub trait TimerService {
    /// Globally activate the service. Must be called once before any
    /// [`start`](TimerService::start); starts issued while disabled never
    /// fire.
    fn enable(&self);

    /// Allocate a timer slot.
    ///
    /// Slots are assigned once at initialization and never recycled;
    /// exhaustion is a static configuration error and fatal to setup.
    fn claim(&self, mode: TimerMode) -> Result<TimerSlot, DispatchError>;

    /// Arm the slot to expire after `delay`. Restarts the slot if it is
    /// already running, so repeated calls extend the window instead of
    /// firing twice.
    fn start(&self, slot: TimerSlot, delay: Duration);
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use core::cell::{Cell, RefCell};
    use heapless::Vec;

    /// Software-timer mock with a manually advanced clock.
    ///
    /// `advance` fires due slots through a caller-provided sink, earliest
    /// deadline first (ties broken by slot index), so debounce-window
    /// behavior is fully deterministic.
    pub struct MockTimer<const SLOTS: usize> {
        enabled: Cell<bool>,
        claimed: Cell<usize>,
        clock_ms: Cell<u64>,
        modes: RefCell<[TimerMode; SLOTS]>,
        deadlines: RefCell<[Option<u64>; SLOTS]>,
        periods: RefCell<[u64; SLOTS]>,
        start_log: RefCell<Vec<(TimerSlot, u64), 64>>,
    }

    impl<const SLOTS: usize> MockTimer<SLOTS> {
        pub fn new() -> Self {
            Self {
                enabled: Cell::new(false),
                claimed: Cell::new(0),
                clock_ms: Cell::new(0),
                modes: RefCell::new([TimerMode::OneShot; SLOTS]),
                deadlines: RefCell::new([None; SLOTS]),
                periods: RefCell::new([0; SLOTS]),
                start_log: RefCell::new(Vec::new()),
            }
        }

        /// Current mock clock in milliseconds
        pub fn now_ms(&self) -> u64 {
            self.clock_ms.get()
        }

        pub fn is_enabled(&self) -> bool {
            self.enabled.get()
        }

        /// Number of slots claimed so far
        pub fn claimed(&self) -> usize {
            self.claimed.get()
        }

        /// True if the slot is armed and has not yet fired
        pub fn armed(&self, slot: TimerSlot) -> bool {
            self.deadlines.borrow()[slot.index()].is_some()
        }

        /// How many times the slot was started or restarted
        pub fn start_count(&self, slot: TimerSlot) -> usize {
            self.start_log
                .borrow()
                .iter()
                .filter(|(s, _)| *s == slot)
                .count()
        }

        /// Delay of the most recent start of the slot, in milliseconds
        pub fn last_delay_ms(&self, slot: TimerSlot) -> Option<u64> {
            self.start_log
                .borrow()
                .iter()
                .rev()
                .find(|(s, _)| *s == slot)
                .map(|(_, d)| *d)
        }

        /// Earliest armed deadline at or before `limit_ms`
        fn next_due(&self, limit_ms: u64) -> Option<(usize, u64)> {
            let deadlines = self.deadlines.borrow();
            let mut due: Option<(usize, u64)> = None;
            for (index, deadline) in deadlines.iter().enumerate() {
                if let Some(at) = deadline {
                    if *at <= limit_ms && due.map_or(true, |(_, best)| *at < best) {
                        due = Some((index, *at));
                    }
                }
            }
            due
        }

        /// Advance the mock clock, delivering every expiry that becomes due
        /// to `sink` in deadline order
        pub fn advance(&self, delta_ms: u64, mut sink: impl FnMut(TimerSlot)) {
            let target = self.clock_ms.get() + delta_ms;
            while let Some((index, at)) = self.next_due(target) {
                self.clock_ms.set(at);
                let reload = self.modes.borrow()[index].reloads();
                {
                    let mut deadlines = self.deadlines.borrow_mut();
                    deadlines[index] = if reload {
                        Some(at + self.periods.borrow()[index])
                    } else {
                        None
                    };
                }
                if self.enabled.get() {
                    sink(TimerSlot::from_index(index as u8));
                }
            }
            self.clock_ms.set(target);
        }
    }

    impl<const SLOTS: usize> Default for MockTimer<SLOTS> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<const SLOTS: usize> TimerService for MockTimer<SLOTS> {
        fn enable(&self) {
            self.enabled.set(true);
        }

        fn claim(&self, mode: TimerMode) -> Result<TimerSlot, DispatchError> {
            let next = self.claimed.get();
            if next >= SLOTS {
                return Err(DispatchError::TimerExhausted);
            }
            self.modes.borrow_mut()[next] = mode;
            self.claimed.set(next + 1);
            Ok(TimerSlot::from_index(next as u8))
        }

        fn start(&self, slot: TimerSlot, delay: Duration) {
            let delay_ms = delay.as_millis();
            self.deadlines.borrow_mut()[slot.index()] = Some(self.clock_ms.get() + delay_ms);
            self.periods.borrow_mut()[slot.index()] = delay_ms;
            self.start_log.borrow_mut().push((slot, delay_ms)).ok();
        }
    }

    /// Input pin mock driven through a shared level cell
    pub struct MockButton<'a> {
        low: &'a Cell<bool>,
    }

    impl<'a> MockButton<'a> {
        pub fn new(low: &'a Cell<bool>) -> Self {
            Self { low }
        }
    }

    impl embedded_hal::digital::ErrorType for MockButton<'_> {
        type Error = core::convert::Infallible;
    }

    impl embedded_hal::digital::InputPin for MockButton<'_> {
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low.get())
        }

        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low.get())
        }
    }
}
