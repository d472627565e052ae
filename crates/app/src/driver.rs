//! Driver port — what the engine needs from a device driver.

use std::future::Future;
use std::time::Duration;

use indidrive_domain::command::Command;
use indidrive_domain::vector::Vector;

/// One device's protocol behaviour.
///
/// A driver owns its device state and serializes access to it internally,
/// so the engine can call [`handle`](Self::handle) and [`poll`](Self::poll)
/// from concurrently running duties through a shared reference.
pub trait Driver: Send + Sync {
    /// Device name as it appears in every vector.
    fn device(&self) -> &'static str;

    /// Top-level inbound element names this driver understands.
    fn accepted_tags(&self) -> &'static [&'static str];

    /// How often [`poll`](Self::poll) runs.
    fn poll_interval(&self) -> Duration;

    /// React to a decoded command, returning the vectors to send.
    ///
    /// Commands for another device or property, or carrying invalid values,
    /// return nothing.
    fn handle(&self, command: Command) -> Vec<Vector>;

    /// Sample the device, returning update vectors only when something
    /// changed since the last observation.
    fn poll(&self) -> impl Future<Output = Vec<Vector>> + Send;
}
