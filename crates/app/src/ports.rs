//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the protocol engine and the outside
//! world: the hardware (or its simulation) on one side, the byte stream on
//! the other.

pub mod hardware;
pub mod wire;

pub use hardware::{Clock, DoorHardware, LedHardware, SourceError, SystemClock, TemperatureSource};
pub use wire::{FrameSource, RawFrame, WireCodec};
