//! Wire ports — inbound framing and the message format.

use std::future::Future;

use bytes::Bytes;
use indidrive_domain::command::Command;
use indidrive_domain::vector::Vector;

/// One complete top-level element cut out of the input stream.
///
/// Always starts with `<` followed by `tag`, and is either self-closing or
/// ends with the matching closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// The allow-listed element name this frame starts with.
    pub tag: &'static str,
    pub bytes: Bytes,
}

/// Produces complete frames from an input stream.
pub trait FrameSource: Send {
    /// Wait for the next complete frame.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the stream fails.
    fn next_frame(&mut self) -> impl Future<Output = std::io::Result<Option<RawFrame>>> + Send;
}

/// Translates between frames and domain values.
pub trait WireCodec: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Decode a frame into a command.
    ///
    /// # Errors
    ///
    /// Any malformed, unsupported or invalid frame is an error; the engine
    /// drops it and keeps reading.
    fn decode(&self, frame: &RawFrame) -> Result<Command, Self::Error>;

    /// Encode a vector into one ready-to-send message (without terminator).
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder fails.
    fn encode(&self, vector: &Vector) -> Result<Bytes, Self::Error>;
}
