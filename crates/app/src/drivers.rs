//! Device drivers — one [`Driver`](crate::driver::Driver) per device.

pub mod door;
pub mod led;
pub mod temperature;

pub use door::DoorDriver;
pub use led::LedDriver;
pub use temperature::TemperatureDriver;
