//! STM32F103 board glue: pin map and EXTI entry points
//!
//! Four push buttons on PA0..PA3, active-low with pull-ups, one EXTI line
//! each on the falling edge.

use crate::EDGE_LATCH;

/// Board pin assignments
pub mod pins {
    /// Button 1 input pin (PA0, EXTI0)
    pub const BUTTON1_PIN: u8 = 0;

    /// Button 2 input pin (PA1, EXTI1)
    pub const BUTTON2_PIN: u8 = 1;

    /// Button 3 input pin (PA2, EXTI2)
    pub const BUTTON3_PIN: u8 = 2;

    /// Button 4 input pin (PA3, EXTI3)
    pub const BUTTON4_PIN: u8 = 3;
}

/// Source index for an EXTI line, if a button lives on it
pub const fn source_for_line(line: u8) -> Option<usize> {
    match line {
        pins::BUTTON1_PIN => Some(0),
        pins::BUTTON2_PIN => Some(1),
        pins::BUTTON3_PIN => Some(2),
        pins::BUTTON4_PIN => Some(3),
        _ => None,
    }
}

/// EXTI entry point; the vector table routes EXTI0..EXTI3 here with the
/// originating line number.
///
/// Runs in interrupt context: a single atomic store into the edge latch,
/// nothing else. The edge task picks the latched lines up and arms the
/// debounce timers from task context. Lines without a button are ignored.
pub fn on_button_exti(line: u8) {
    if let Some(source) = source_for_line(line) {
        EDGE_LATCH.raise(source);
    }
}

// Real-board bring-up still to wire in the chip PAC:
// 1. GPIO PA0..PA3 as inputs with pull-up
// 2. EXTI0..EXTI3 falling-edge trigger, NVIC enable
// 3. #[interrupt] fn EXTI0() { on_button_exti(0); clear pending bit }
//    and likewise for the other lines
// 4. SysTick at 1 kHz calling time_driver::systick_tick()
