//! Cooperative dispatch loop over the event-flag register

use crate::flags::EventFlags;
use crate::types::MAX_SOURCES;

/// Per-source action invoked by the dispatch loop.
///
/// Handlers run synchronously on the loop's execution context and block
/// every other pending source, so they are expected to complete quickly.
/// Faults inside a handler are the handler's own responsibility; the loop
/// catches nothing.
pub trait EventHandler {
    fn on_event(&mut self);
}

/// Adapter making a closure usable as an [`EventHandler`]
pub struct FnHandler<F: FnMut()>(pub F);

impl<F: FnMut()> EventHandler for FnHandler<F> {
    fn on_event(&mut self) {
        (self.0)()
    }
}

/// Routes raised flag bits to their handlers.
///
/// The source-to-handler table is fixed at construction. Each scan pass
/// snapshots the register and services set bits in ascending index order,
/// clearing each bit after its handler returns and before the next index is
/// checked. Bits raised after the snapshot, including by timers firing
/// mid-handler, wait for the next pass; a bit re-raised inside its own
/// handler is lost, since the clear lands after the handler returns.
pub struct Dispatcher<'a, const N: usize> {
    flags: &'a EventFlags,
    handlers: [&'a mut dyn EventHandler; N],
}

impl<'a, const N: usize> Dispatcher<'a, N> {
    /// Bind the handler table to a flag register.
    ///
    /// Panics if `N` exceeds the register width; that is a static
    /// configuration error.
    pub fn new(flags: &'a EventFlags, handlers: [&'a mut dyn EventHandler; N]) -> Self {
        assert!(N <= MAX_SOURCES, "more sources than flag bits");
        Self { flags, handlers }
    }

    /// One scan pass. Returns the number of sources serviced; does no work
    /// when the register is zero.
    pub fn poll(&mut self) -> usize {
        let pending = self.flags.snapshot();
        if pending == 0 {
            return 0;
        }

        let mut serviced = 0;
        for (source, handler) in self.handlers.iter_mut().enumerate() {
            if pending & (1 << source) != 0 {
                #[cfg(feature = "defmt")]
                defmt::trace!("dispatching source {}", source);
                handler.on_event();
                self.flags.clear(source);
                serviced += 1;
            }
        }
        serviced
    }

    /// Run the dispatch loop forever on the current execution context.
    ///
    /// Pure busy-polling; asynchronous producers (interrupts, timer
    /// expiries) are the only things that make a later pass do work.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }
}
