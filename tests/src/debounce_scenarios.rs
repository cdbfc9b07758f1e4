//! Debounce-window scenarios driven through the mock timer's manual clock

use button_core::hal::mock::MockTimer;
use button_core::test_utils::edge_script::EdgeScript;
use button_core::{
    DebounceController, DispatchConfig, DispatchError, EventFlags, Polarity, TimerService,
};
use rstest::rstest;

fn config() -> DispatchConfig {
    DispatchConfig::new(50, Polarity::ActiveLow).unwrap()
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
fn isolated_edge_yields_exactly_one_flag(#[case] source: usize) {
    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let ctl = DebounceController::<_, 4>::bind(&timer, &flags, &config()).unwrap();
    timer.enable();
    assert!(timer.is_enabled());
    assert_eq!(ctl.delay().as_millis(), 50);

    EdgeScript::single_press(source).run(&timer, &ctl, 200);

    assert_eq!(flags.snapshot(), 1 << source);
    assert_eq!(timer.now_ms(), 200);
}

#[test]
fn rapid_double_edge_fires_once() {
    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let ctl = DebounceController::<_, 4>::bind(&timer, &flags, &config()).unwrap();
    timer.enable();

    let mut fires = 0;
    ctl.on_edge(1);
    timer.advance(30, |slot| {
        fires += 1;
        ctl.on_expired(slot);
    });
    // Second edge inside the window restarts the slot instead of firing it
    ctl.on_edge(1);
    timer.advance(200, |slot| {
        fires += 1;
        ctl.on_expired(slot);
    });

    assert_eq!(fires, 1);
    assert_eq!(flags.snapshot(), 0x02);
    assert_eq!(timer.start_count(ctl.slot(1).unwrap()), 2);
    assert_eq!(timer.last_delay_ms(ctl.slot(1).unwrap()), Some(50));
    assert!(!timer.armed(ctl.slot(1).unwrap()));
}

#[rstest]
#[case(5, 8)]
#[case(10, 4)]
#[case(49, 2)]
fn bounce_train_inside_window_yields_one_flag(#[case] gap_ms: u64, #[case] bounces: usize) {
    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let ctl = DebounceController::<_, 4>::bind(&timer, &flags, &config()).unwrap();
    timer.enable();

    EdgeScript::bouncy_press(2, gap_ms, bounces).run(&timer, &ctl, 200);

    assert_eq!(flags.snapshot(), 0x04);
    assert_eq!(timer.start_count(ctl.slot(2).unwrap()), bounces + 1);
}

#[test]
fn two_presses_apart_yield_two_flags_in_turn() {
    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let ctl = DebounceController::<_, 4>::bind(&timer, &flags, &config()).unwrap();
    timer.enable();

    ctl.on_edge(0);
    timer.advance(60, |slot| ctl.on_expired(slot));
    assert_eq!(flags.snapshot(), 0x01);

    // Consumer handled the first press
    flags.clear(0);

    ctl.on_edge(0);
    timer.advance(60, |slot| ctl.on_expired(slot));
    assert_eq!(flags.snapshot(), 0x01);
}

#[test]
fn staggered_presses_accumulate_flags() {
    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let ctl = DebounceController::<_, 4>::bind(&timer, &flags, &config()).unwrap();
    timer.enable();

    EdgeScript::staggered(&[2, 0, 3], 10).run(&timer, &ctl, 200);

    assert_eq!(flags.snapshot(), 0x0d);
}

#[test]
fn custom_edge_script_replays_in_time_order() {
    use button_core::test_utils::edge_script::EdgeEvent;
    use heapless::{String, Vec};

    let timer = MockTimer::<4>::new();
    let flags = EventFlags::new();
    let ctl = DebounceController::<_, 4>::bind(&timer, &flags, &config()).unwrap();
    timer.enable();

    let script = EdgeScript {
        events: Vec::from_slice(&[
            EdgeEvent { at_ms: 0, source: 1 },
            EdgeEvent { at_ms: 30, source: 1 },
            EdgeEvent { at_ms: 40, source: 2 },
        ])
        .unwrap(),
        description: String::try_from("Bounce on 1, press on 2").unwrap(),
    };
    script.run(&timer, &ctl, 200);

    // Source 1 resolved once despite the bounce, source 2 independently
    assert_eq!(flags.snapshot(), 0x06);
    assert_eq!(timer.start_count(ctl.slot(1).unwrap()), 2);
    assert_eq!(timer.start_count(ctl.slot(2).unwrap()), 1);
}

#[test]
fn binding_more_sources_than_slots_is_fatal() {
    let timer = MockTimer::<3>::new();
    let flags = EventFlags::new();
    let result = DebounceController::<_, 4>::bind(&timer, &flags, &config());
    assert_eq!(result.err(), Some(DispatchError::TimerExhausted));
}
