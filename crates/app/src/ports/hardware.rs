//! Hardware ports — the capabilities a device backend must provide.
//!
//! The drivers only ever talk to these traits, so a simulated backend can be
//! swapped for real limit switches, GPIO or a sensor bus without touching the
//! protocol engine.

use std::future::Future;
use std::time::Instant;

use indidrive_domain::door::DoorStatus;
use indidrive_domain::temperature::Reading;

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// [`Clock`] backed by tokio's clock, so paused-time tests drive it too.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// A roll-off door.
///
/// Contract:
/// - [`status`](Self::status) reports one of the four statuses; completing a
///   movement is observed here, driven by time or limit switches.
/// - [`request`](Self::request) accepts only `Opening` / `Closing`; the
///   terminal statuses can never be set by a command.
pub trait DoorHardware: Send + Sync {
    fn status(&self) -> DoorStatus;

    /// Ask the door to start moving. Returns whether the request was accepted.
    fn request(&self, target: DoorStatus) -> bool;
}

/// A single on/off LED.
pub trait LedHardware: Send + Sync {
    fn is_on(&self) -> bool;

    fn set(&self, on: bool);
}

/// Failure of a temperature backend.
///
/// Boxes the adapter's own error so the drivers stay adapter-agnostic.
#[derive(Debug, thiserror::Error)]
#[error("temperature source failed")]
pub struct SourceError(#[source] pub Box<dyn std::error::Error + Send + Sync>);

/// Where temperature readings come from.
pub trait TemperatureSource: Send + Sync {
    /// Produce the latest reading.
    ///
    /// `current` is the reading the driver already holds; a source with
    /// nothing newer returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the backend cannot be reached or answers
    /// with something unusable. The driver then keeps `current`.
    fn fetch(&self, current: &Reading) -> impl Future<Output = Result<Reading, SourceError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn should_follow_paused_tokio_time() {
        let clock = SystemClock;
        let before = clock.now();
        tokio::time::advance(std::time::Duration::from_secs(30)).await;
        let after = clock.now();
        assert!(after.duration_since(before) >= std::time::Duration::from_secs(30));
    }

    #[test]
    fn should_describe_source_error() {
        let inner: Box<dyn std::error::Error + Send + Sync> = "connection refused".into();
        let err = SourceError(inner);
        assert_eq!(err.to_string(), "temperature source failed");
        assert_eq!(
            std::error::Error::source(&err).map(ToString::to_string),
            Some("connection refused".to_string())
        );
    }
}
