//! Minimal embassy time driver driven by a 1 kHz SysTick

use embassy_time_driver::{AlarmHandle, Driver};
use portable_atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};

/// Tick-counter time driver with a single alarm slot.
///
/// `tick` is called from the SysTick handler; the executor's timer queue
/// claims the one alarm. The tick counter wraps after ~49 days.
pub struct SysTickDriver {
    ticks: AtomicU32,
    alarm_taken: AtomicBool,
    alarm_at: AtomicU64,
    alarm_callback: AtomicUsize,
    alarm_ctx: AtomicUsize,
}

impl SysTickDriver {
    const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            alarm_taken: AtomicBool::new(false),
            alarm_at: AtomicU64::new(u64::MAX),
            alarm_callback: AtomicUsize::new(0),
            alarm_ctx: AtomicUsize::new(0),
        }
    }

    /// Advance the time base by one tick and fire a due alarm
    fn tick(&self) {
        let now = self.ticks.fetch_add(1, Ordering::Relaxed) as u64 + 1;
        if now >= self.alarm_at.load(Ordering::Relaxed) {
            self.alarm_at.store(u64::MAX, Ordering::Relaxed);
            let callback = self.alarm_callback.load(Ordering::Relaxed);
            if callback != 0 {
                let f: fn(*mut ()) = unsafe { core::mem::transmute(callback) };
                f(self.alarm_ctx.load(Ordering::Relaxed) as *mut ());
            }
        }
    }
}

impl Driver for SysTickDriver {
    fn now(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed) as u64
    }

    unsafe fn allocate_alarm(&self) -> Option<AlarmHandle> {
        if self.alarm_taken.swap(true, Ordering::Relaxed) {
            None
        } else {
            Some(AlarmHandle::new(0))
        }
    }

    fn set_alarm_callback(&self, _alarm: AlarmHandle, callback: fn(*mut ()), ctx: *mut ()) {
        self.alarm_callback
            .store(callback as usize, Ordering::Relaxed);
        self.alarm_ctx.store(ctx as usize, Ordering::Relaxed);
    }

    fn set_alarm(&self, _alarm: AlarmHandle, timestamp: u64) -> bool {
        if timestamp <= self.now() {
            // Already in the past; caller fires the queue itself
            return false;
        }
        self.alarm_at.store(timestamp, Ordering::Relaxed);
        true
    }
}

embassy_time_driver::time_driver_impl!(static DRIVER: SysTickDriver = SysTickDriver::new());

/// SysTick handler hook; call at 1 kHz
pub fn systick_tick() {
    DRIVER.tick();
}
