//! # indidrive-app
//!
//! Application layer — the protocol engine, the per-device drivers and
//! **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DoorHardware`, `LedHardware`, `TemperatureSource` — device capabilities
//!   - `Clock` — monotonic time for simulated hardware
//!   - `FrameSource`, `WireCodec` — inbound framing and the wire format
//! - Provide the **drivers**: per-device command handling, change detection
//!   and vector building
//! - Provide the **engine**: the read/dispatch, drain/write and poll/notify
//!   duties sharing one [`outbox::Outbox`]
//!
//! ## Dependency rule
//! Depends on `indidrive-domain` only (plus `tokio` for time, IO traits and
//! notification). Never imports adapter crates. Adapters depend on *this*
//! crate, not the reverse.

pub mod driver;
pub mod drivers;
pub mod engine;
pub mod outbox;
pub mod ports;
