//! Per-source button handlers

use embedded_hal::digital::InputPin;

use crate::dispatch::EventHandler;
use crate::types::Polarity;

/// Dispatch-time action for one button source.
///
/// Re-reads the live pin level and counts a press only if the pin still
/// reads asserted: a press released before the debounce window closed leaves
/// a flag behind but no press. Pin read errors are swallowed here; the
/// dispatch loop propagates nothing.
pub struct ButtonHandler<P> {
    pin: P,
    source: usize,
    polarity: Polarity,
    presses: u32,
}

impl<P: InputPin> ButtonHandler<P> {
    pub fn new(pin: P, source: usize, polarity: Polarity) -> Self {
        Self {
            pin,
            source,
            polarity,
            presses: 0,
        }
    }

    /// Source index this handler is mapped to
    pub fn source(&self) -> usize {
        self.source
    }

    /// Number of confirmed presses so far
    pub fn presses(&self) -> u32 {
        self.presses
    }

    fn still_asserted(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => self.polarity.is_asserted(low),
            Err(_) => false,
        }
    }
}

impl<P: InputPin> EventHandler for ButtonHandler<P> {
    fn on_event(&mut self) {
        if !self.still_asserted() {
            // Released before the debounce window closed; stale trigger
            return;
        }
        self.presses += 1;
        #[cfg(feature = "defmt")]
        defmt::info!("Button {} pressed", self.source + 1);
    }
}
