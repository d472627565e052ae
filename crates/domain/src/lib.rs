//! # indidrive-domain
//!
//! Pure domain model for the indidrive device drivers.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Property states** (`Idle`/`Ok`/`Busy`/`Alert`), switch states,
//!   permissions and rules
//! - Define **Property descriptors** (static name/label/group metadata)
//! - Define **Commands** (decoded client requests: `getProperties`,
//!   `newSwitchVector`)
//! - Define **Vectors** (outbound definition and update messages, as values)
//! - Define **Device models**: the roll-off door state machine, the
//!   temperature reading, the LED
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod command;
pub mod property;
pub mod vector;

pub mod door;
pub mod led;
pub mod temperature;
