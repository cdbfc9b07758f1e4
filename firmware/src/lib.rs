#![no_std]

//! Firmware shell wiring interrupts, the software timer and the dispatch
//! loop together on an STM32F103-class board

pub use embassy_executor::Spawner;
pub use embassy_time::Duration;
pub use static_cell::StaticCell;

pub use button_core::*;

pub use crate::mock_hardware::*;
pub use crate::stm32_hardware::*;
pub use crate::tasks::*;

/// Number of button sources on the board
pub const BUTTON_COUNT: usize = 4;

/// Debounced event flags; timer expiries raise, the dispatch loop clears
pub static FLAGS: EventFlags = EventFlags::new();

/// Raw-edge latch between EXTI context and the edge-drain task
pub static EDGE_LATCH: EventFlags = EventFlags::new();

/// Software timer pool, armed from interrupt context
pub static SOFT_TIMER: SoftTimer<BUTTON_COUNT> = SoftTimer::new();

/// Debounce controller as wired on this board
pub type BoardDebounce = DebounceController<'static, SoftTimer<BUTTON_COUNT>, BUTTON_COUNT>;

// Mock hardware module
pub mod mock_hardware {
    use core::convert::Infallible;
    use core::sync::atomic::{AtomicBool, Ordering};

    use embedded_hal::digital::{ErrorType, InputPin};

    use crate::{BUTTON_COUNT, EDGE_LATCH};

    const RELEASED: AtomicBool = AtomicBool::new(false);

    /// Electrical level per button, true = reads low (pressed, active-low)
    static LEVELS: [AtomicBool; BUTTON_COUNT] = [RELEASED; BUTTON_COUNT];

    /// Mock button pin backed by a shared atomic level
    #[derive(Debug)]
    pub struct MockButton {
        source: usize,
    }

    impl MockButton {
        pub fn new(source: usize) -> Self {
            #[cfg(feature = "defmt")]
            defmt::info!("🧪 mock button {} (for bring-up without the board)", source + 1);
            Self { source }
        }
    }

    impl ErrorType for MockButton {
        type Error = Infallible;
    }

    impl InputPin for MockButton {
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(LEVELS[self.source].load(Ordering::Relaxed))
        }

        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!LEVELS[self.source].load(Ordering::Relaxed))
        }
    }

    /// Simulate a press: drive the level low and latch the falling edge,
    /// exactly what the EXTI handler does on the real board
    pub fn press(source: usize) {
        if source >= BUTTON_COUNT {
            return;
        }
        LEVELS[source].store(true, Ordering::Relaxed);
        EDGE_LATCH.raise(source);
    }

    /// Simulate a release: level back high, no edge of interest
    pub fn release(source: usize) {
        if source >= BUTTON_COUNT {
            return;
        }
        LEVELS[source].store(false, Ordering::Relaxed);
    }
}

// Embassy tasks module
pub mod tasks {
    use super::*;
    use embassy_time::{Instant, Timer};

    /// Drains the raw-edge latch into the debounce controller.
    ///
    /// Keeps interrupt context down to a single atomic store; the
    /// controller runs here, in task context.
    #[embassy_executor::task]
    pub async fn edge_task(debounce: &'static BoardDebounce) {
        #[cfg(feature = "defmt")]
        defmt::info!("⚡ edge task started");

        loop {
            let mut edges = EDGE_LATCH.take_all();
            while edges != 0 {
                let source = edges.trailing_zeros() as usize;
                debounce.on_edge(source);
                edges &= edges - 1;
            }
            Timer::after(Duration::from_millis(1)).await;
        }
    }

    /// Ticks the software timer, delivering expiries to the controller
    #[embassy_executor::task]
    pub async fn timer_task(debounce: &'static BoardDebounce) {
        #[cfg(feature = "defmt")]
        defmt::info!("⏲️ timer task started");

        loop {
            SOFT_TIMER.poll_due(Instant::now(), |slot| debounce.on_expired(slot));
            Timer::after(Duration::from_millis(1)).await;
        }
    }

    /// Hosts the dispatch loop cooperatively: scans back-to-back while
    /// work is pending, sleeps briefly when a pass serviced nothing
    #[embassy_executor::task]
    pub async fn dispatch_task(mut dispatcher: Dispatcher<'static, BUTTON_COUNT>) {
        #[cfg(feature = "defmt")]
        defmt::info!("🔁 dispatch loop running");

        loop {
            if dispatcher.poll() == 0 {
                Timer::after(Duration::from_millis(1)).await;
            }
        }
    }

    /// Demo stimulus for the mock hardware: presses each button in turn
    #[embassy_executor::task]
    pub async fn press_sim_task() {
        let mut source = 0;
        loop {
            Timer::after(Duration::from_secs(1)).await;
            mock_hardware::press(source);
            Timer::after(Duration::from_millis(120)).await;
            mock_hardware::release(source);
            source = (source + 1) % BUTTON_COUNT;
        }
    }
}

// Board pin map and interrupt entry points
pub mod stm32_hardware;

// Time driver for embassy
pub mod time_driver;
