//! Simulated LED.

use std::sync::atomic::{AtomicBool, Ordering};

use indidrive_app::ports::LedHardware;

/// An LED that is off until told otherwise.
#[derive(Debug, Default)]
pub struct SimulatedLed {
    on: AtomicBool,
}

impl LedHardware for SimulatedLed {
    fn is_on(&self) -> bool {
        self.on.load(Ordering::Acquire)
    }

    fn set(&self, on: bool) {
        self.on.store(on, Ordering::Release);
        tracing::debug!(on, "simulated led set");
    }
}
