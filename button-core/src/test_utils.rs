//! Test utilities for driving the debounce pipeline deterministically

#[cfg(feature = "test-utils")]
pub mod edge_script {
    //! Timestamped raw-edge scripts replayed against a controller and a
    //! mock timer

    use heapless::{String, Vec};

    use crate::debounce::DebounceController;
    use crate::hal::mock::MockTimer;

    /// One raw edge at an absolute script time
    #[derive(Debug, Clone, Copy)]
    pub struct EdgeEvent {
        pub at_ms: u64,
        pub source: usize,
    }

    /// Ordered sequence of raw edges
    #[derive(Debug, Clone)]
    pub struct EdgeScript {
        pub events: Vec<EdgeEvent, 64>,
        pub description: String<32>,
    }

    impl EdgeScript {
        /// A single clean edge on one source at t=0
        pub fn single_press(source: usize) -> Self {
            Self {
                events: Vec::from_slice(&[EdgeEvent { at_ms: 0, source }]).unwrap(),
                description: String::try_from("Single press").unwrap(),
            }
        }

        /// A press with `bounces` spurious re-edges spaced `gap_ms` apart
        pub fn bouncy_press(source: usize, gap_ms: u64, bounces: usize) -> Self {
            let mut events = Vec::new();
            for n in 0..=bounces {
                events
                    .push(EdgeEvent {
                        at_ms: gap_ms * n as u64,
                        source,
                    })
                    .ok();
            }
            Self {
                events,
                description: String::try_from("Bouncy press").unwrap(),
            }
        }

        /// One edge per listed source, spaced `spacing_ms` apart
        pub fn staggered(sources: &[usize], spacing_ms: u64) -> Self {
            let mut events = Vec::new();
            for (n, source) in sources.iter().enumerate() {
                events
                    .push(EdgeEvent {
                        at_ms: spacing_ms * n as u64,
                        source: *source,
                    })
                    .ok();
            }
            Self {
                events,
                description: String::try_from("Staggered presses").unwrap(),
            }
        }

        /// Replay the script, then let `settle_ms` of quiet time elapse.
        ///
        /// Expiries are routed back into the controller as they come due,
        /// exactly as the platform's timer tick would.
        pub fn run<const S: usize, const N: usize>(
            &self,
            timer: &MockTimer<S>,
            ctl: &DebounceController<'_, MockTimer<S>, N>,
            settle_ms: u64,
        ) {
            let mut elapsed = 0;
            for event in &self.events {
                timer.advance(event.at_ms - elapsed, |slot| ctl.on_expired(slot));
                elapsed = event.at_ms;
                ctl.on_edge(event.source);
            }
            timer.advance(settle_ms, |slot| ctl.on_expired(slot));
        }
    }
}
