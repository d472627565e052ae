//! Simulated roll-off door — time stands in for the limit switches.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indidrive_app::ports::{Clock, DoorHardware, SystemClock};
use indidrive_domain::door::{DEFAULT_DWELL, Door, DoorStatus};

/// A door that finishes every movement `dwell` after it started.
pub struct SimulatedDoor<C = SystemClock> {
    door: Mutex<Door>,
    clock: C,
}

impl Default for SimulatedDoor {
    fn default() -> Self {
        Self::new(SystemClock, DEFAULT_DWELL)
    }
}

impl<C: Clock> SimulatedDoor<C> {
    /// A closed door.
    #[must_use]
    pub fn new(clock: C, dwell: Duration) -> Self {
        let door = Door::new(clock.now(), dwell);
        Self {
            door: Mutex::new(door),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Door> {
        self.door.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock> DoorHardware for SimulatedDoor<C> {
    fn status(&self) -> DoorStatus {
        let now = self.clock.now();
        self.lock().status(now)
    }

    fn request(&self, target: DoorStatus) -> bool {
        let now = self.clock.now();
        let accepted = self.lock().request(target, now);
        if accepted {
            tracing::debug!(status = %target, "simulated door moving");
        }
        accepted
    }
}
