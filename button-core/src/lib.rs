#![cfg_attr(not(feature = "std"), no_std)]

//! # Button Core
//!
//! Debounced event-flag dispatch for embedded button inputs.
//! GPIO edges arm one-shot debounce timers; expired timers raise bits in a
//! shared flag register; a cooperative loop routes each raised bit to its
//! handler.

pub mod types;
pub mod flags;
pub mod debounce;
pub mod dispatch;
pub mod handlers;
pub mod soft_timer;
pub mod hal;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use types::*;
pub use flags::*;
pub use debounce::*;
pub use dispatch::*;
pub use handlers::*;
pub use soft_timer::*;
pub use hal::{*, Instant, Duration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration for mechanical push buttons wired active-low
pub fn default_config() -> DispatchConfig {
    DispatchConfig {
        debounce: Duration::from_millis(50),
        polarity: Polarity::ActiveLow,
    }
}
