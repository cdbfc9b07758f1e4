#![no_std]
#![no_main]

#[cfg(feature = "defmt")]
use defmt_rtt as _;

// Panic handler
use panic_halt as _;

use embassy_executor::Spawner;
use embassy_time::Duration;
use static_cell::StaticCell;

use button_core::*;
use rustybuttons_firmware::*;

// Static resources
static DEBOUNCE: StaticCell<BoardDebounce> = StaticCell::new();
static HANDLERS: StaticCell<[ButtonHandler<MockButton>; BUTTON_COUNT]> = StaticCell::new();

/// Main firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    #[cfg(feature = "defmt")]
    defmt::info!("🔘 Button firmware starting...");

    let config = default_config();

    // Timer service must be live before any debounce slot is armed
    SOFT_TIMER.enable();

    // Slot exhaustion is a static configuration error; refuse to enter the
    // dispatch loop
    let debounce: &'static BoardDebounce = match DebounceController::bind(&SOFT_TIMER, &FLAGS, &config) {
        Ok(ctl) => DEBOUNCE.init(ctl),
        Err(_) => panic!("software timer exhausted"),
    };
    #[cfg(feature = "defmt")]
    defmt::info!(
        "✅ debounce bound: {} sources, {} ms window",
        BUTTON_COUNT,
        config.debounce_ms()
    );

    // Fixed source-to-handler table; mock pins until the board HAL lands
    let handlers = HANDLERS.init([
        ButtonHandler::new(MockButton::new(0), 0, config.polarity),
        ButtonHandler::new(MockButton::new(1), 1, config.polarity),
        ButtonHandler::new(MockButton::new(2), 2, config.polarity),
        ButtonHandler::new(MockButton::new(3), 3, config.polarity),
    ]);
    let [h0, h1, h2, h3] = handlers;
    let dispatcher = Dispatcher::new(
        &FLAGS,
        [
            h0 as &mut dyn EventHandler,
            h1 as &mut dyn EventHandler,
            h2 as &mut dyn EventHandler,
            h3 as &mut dyn EventHandler,
        ],
    );

    spawner.must_spawn(edge_task(debounce));
    spawner.must_spawn(timer_task(debounce));
    spawner.must_spawn(dispatch_task(dispatcher));
    spawner.must_spawn(press_sim_task());

    #[cfg(feature = "defmt")]
    defmt::info!("✨ event loop ready");

    // Main supervision loop
    loop {
        embassy_time::Timer::after(Duration::from_secs(1)).await;
        #[cfg(feature = "defmt")]
        defmt::trace!("💓 heartbeat");
    }
}
