// Scenario walk of the full debounce-dispatch pipeline on mock hardware

use std::cell::{Cell, RefCell};

use button_core::hal::mock::{MockButton, MockTimer};
use button_core::test_utils::edge_script::EdgeScript;
use button_core::{
    ButtonHandler, DebounceController, Dispatcher, EventFlags, EventHandler, FnHandler, Polarity,
    TimerService, default_config,
};

fn main() {
    println!("🧪 Event-flag dispatch integration scenarios");

    scenario_ordering();
    scenario_bounce_absorption();
    scenario_stale_trigger();

    println!("✅ All integration scenarios passed!");
    println!();
    println!("📝 Run the full suite with: cargo test");
}

/// Flags raised out of order are serviced lowest index first, each bit
/// cleared before the next source is checked
fn scenario_ordering() {
    println!("🔀 Scenario: ascending dispatch order...");

    let flags = EventFlags::new();
    let order = RefCell::new(Vec::new());
    let order_ref = &order;

    let mut h0 = FnHandler(move || order_ref.borrow_mut().push(0));
    let mut h1 = FnHandler(move || order_ref.borrow_mut().push(1));
    let mut h2 = FnHandler(move || order_ref.borrow_mut().push(2));
    let mut dispatcher = Dispatcher::new(
        &flags,
        [
            &mut h0 as &mut dyn EventHandler,
            &mut h1 as &mut dyn EventHandler,
            &mut h2 as &mut dyn EventHandler,
        ],
    );

    flags.raise(2);
    flags.raise(0);
    println!("  register before scan: {:#04x}", flags.snapshot());
    let serviced = dispatcher.poll();

    assert_eq!(serviced, 2);
    assert_eq!(*order.borrow(), vec![0, 2]);
    assert_eq!(flags.snapshot(), 0x00);
    println!("  ✅ serviced {:?}, register back to 0x00", order.borrow());
}

/// A bouncing press schedules, restarts, and resolves to a single flag
fn scenario_bounce_absorption() {
    println!("⏱️ Scenario: bounce absorption...");

    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let config = default_config();
    let ctl = DebounceController::<_, 4>::bind(&timer, &flags, &config)
        .expect("slot pool sized for four sources");
    timer.enable();

    EdgeScript::bouncy_press(3, 10, 5).run(&timer, &ctl, 200);

    assert_eq!(flags.snapshot(), 0x08);
    assert_eq!(timer.start_count(ctl.slot(3).unwrap()), 6);
    println!(
        "  ✅ 6 raw edges -> {} timer starts -> one flag (0x08)",
        timer.start_count(ctl.slot(3).unwrap())
    );
}

/// A press that ends before the debounce window closes raises a flag but
/// no press: the handler re-checks the live pin
fn scenario_stale_trigger() {
    println!("🖐️ Scenario: stale-trigger suppression...");

    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let config = default_config();
    let ctl = DebounceController::<_, 1>::bind(&timer, &flags, &config).unwrap();
    timer.enable();

    let level = Cell::new(true);
    let mut handler = ButtonHandler::new(MockButton::new(&level), 0, Polarity::ActiveLow);

    {
        let mut dispatcher = Dispatcher::new(&flags, [&mut handler as &mut dyn EventHandler]);

        ctl.on_edge(0);
        level.set(false); // released almost immediately
        timer.advance(60, |slot| ctl.on_expired(slot));
        assert_eq!(flags.snapshot(), 0x01);

        dispatcher.poll();
        assert_eq!(flags.snapshot(), 0x00);
    }

    assert_eq!(handler.presses(), 0);
    println!("  ✅ flag raised and cleared, zero presses counted");
}
