//! Roll-off door driver.
//!
//! Answers discovery with the `DOOR_STATE` light vector and the
//! `DOME_SHUTTER` switch vector, starts movements on `newSwitchVector`, and
//! reports every observed status change as a `setLightVector` followed by a
//! `setSwitchVector`.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indidrive_domain::command::{Command, GetProperties, SetSwitch};
use indidrive_domain::door::{DEVICE, DOOR_STATE, DoorStatus, SHUTTER};
use indidrive_domain::property::PropertyState;
use indidrive_domain::time::{self, Timestamp};
use indidrive_domain::vector::{LightVector, SwitchVector, Vector, VectorKind};

use crate::driver::Driver;
use crate::ports::DoorHardware;

/// Inbound elements the door understands.
pub const ACCEPTED_TAGS: &[&str] = &["getProperties", "newSwitchVector"];

/// How often the door is sampled.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Protocol driver for a roll-off door.
pub struct DoorDriver<H> {
    hardware: H,
    /// Last status reported to clients.
    observed: Mutex<DoorStatus>,
    poll_interval: Duration,
}

impl<H: DoorHardware> DoorDriver<H> {
    #[must_use]
    pub fn new(hardware: H, poll_interval: Duration) -> Self {
        let observed = Mutex::new(hardware.status());
        Self {
            hardware,
            observed,
            poll_interval,
        }
    }

    #[must_use]
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    fn definitions(&self, request: &GetProperties) -> Vec<Vector> {
        let status = self.hardware.status();
        let now = time::now();
        let mut vectors = Vec::with_capacity(2);
        if request.wants(&DOOR_STATE) {
            vectors.push(state_vector(status, VectorKind::Definition, now));
        }
        if request.wants(&SHUTTER) {
            vectors.push(shutter_vector(status, VectorKind::Definition, now));
        }
        vectors
    }

    fn apply(&self, request: &SetSwitch) -> Vec<Vector> {
        if !request.targets(&SHUTTER) {
            tracing::debug!(
                device = %request.device,
                name = %request.name,
                "ignoring switch vector for another property"
            );
            return Vec::new();
        }

        // the last recognised element wins
        let Some(target) = request
            .switches
            .iter()
            .rev()
            .find_map(|(element, value)| DoorStatus::requested_by(element, *value))
        else {
            return Vec::new();
        };

        if self.hardware.request(target) {
            tracing::info!(device = DEVICE, status = %target, "door movement requested");
        } else {
            tracing::debug!(device = DEVICE, status = %target, "door request had no effect");
        }

        self.observe()
    }

    /// Compare the hardware status with the last reported one.
    fn observe(&self) -> Vec<Vector> {
        let mut observed = self
            .observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let status = self.hardware.status();
        if status == *observed {
            return Vec::new();
        }

        tracing::info!(device = DEVICE, from = %*observed, to = %status, "door status changed");
        *observed = status;

        let now = time::now();
        vec![
            state_vector(status, VectorKind::Update, now),
            shutter_vector(status, VectorKind::Update, now),
        ]
    }
}

impl<H: DoorHardware> Driver for DoorDriver<H> {
    fn device(&self) -> &'static str {
        DEVICE
    }

    fn accepted_tags(&self) -> &'static [&'static str] {
        ACCEPTED_TAGS
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    fn handle(&self, command: Command) -> Vec<Vector> {
        match command {
            Command::GetProperties(request) => self.definitions(&request),
            Command::SetSwitch(request) => self.apply(&request),
        }
    }

    async fn poll(&self) -> Vec<Vector> {
        self.observe()
    }
}

fn shutter_vector(status: DoorStatus, kind: VectorKind, timestamp: Timestamp) -> Vector {
    let (switches, state) = status.shutter();
    Vector::Switch(SwitchVector {
        kind,
        property: &SHUTTER,
        state,
        timestamp,
        switches: switches.to_vec(),
    })
}

fn state_vector(status: DoorStatus, kind: VectorKind, timestamp: Timestamp) -> Vector {
    Vector::Light(LightVector {
        kind,
        property: &DOOR_STATE,
        state: match kind {
            VectorKind::Definition => Some(PropertyState::Ok),
            VectorKind::Update => None,
        },
        timestamp,
        lights: status.lights().to_vec(),
    })
}
