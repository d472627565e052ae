//! # indidrive-adapter-simulated
//!
//! Stand-in hardware for the drivers.
//!
//! | Device | Type | Behaviour |
//! |--------|------|-----------|
//! | Roll-off door | [`SimulatedDoor`] | Reaches `OPEN` / `CLOSED` a fixed dwell after a movement starts |
//! | LED | [`SimulatedLed`] | Remembers the last level it was set to |
//! | Temperature | [`FixedTemperature`] | Always reports the same reading |
//!
//! ## Dependency rule
//!
//! Depends on `indidrive-app` (port traits) and `indidrive-domain` only.

mod door;
mod led;
mod temperature;

pub use door::SimulatedDoor;
pub use led::SimulatedLed;
pub use temperature::FixedTemperature;
