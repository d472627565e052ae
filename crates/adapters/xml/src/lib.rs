//! # indidrive-adapter-xml
//!
//! The XML side of the property-vector protocol.
//!
//! - [`frame::FrameReader`] cuts complete, allow-listed top-level elements
//!   out of a byte stream (implements [`FrameSource`](indidrive_app::ports::FrameSource)).
//! - [`codec::XmlCodec`] decodes those frames into commands and encodes
//!   vectors back into XML (implements [`WireCodec`](indidrive_app::ports::WireCodec)).

pub mod codec;
pub mod frame;

pub use codec::{CodecError, XmlCodec};
pub use frame::{FrameAssembler, FrameReader};
