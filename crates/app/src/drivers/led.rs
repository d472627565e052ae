//! LED driver: a single read-write switch pair.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indidrive_domain::command::{Command, SetSwitch};
use indidrive_domain::led::{self, DEVICE, LED};
use indidrive_domain::property::PropertyState;
use indidrive_domain::time;
use indidrive_domain::vector::{SwitchVector, Vector, VectorKind};

use crate::driver::Driver;
use crate::ports::LedHardware;

pub const ACCEPTED_TAGS: &[&str] = &["getProperties", "newSwitchVector"];

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct LedDriver<H> {
    hardware: H,
    observed: Mutex<bool>,
    poll_interval: Duration,
}

impl<H: LedHardware> LedDriver<H> {
    #[must_use]
    pub fn new(hardware: H, poll_interval: Duration) -> Self {
        let observed = Mutex::new(hardware.is_on());
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

    /// Every accepted switch vector is answered, changed or not.
    fn apply(&self, request: &SetSwitch) -> Vec<Vector> {
        if !request.targets(&LED) {
            tracing::debug!(
                device = %request.device,
                name = %request.name,
                "ignoring switch vector"
            );
            return Vec::new();
        }
        let requested = request
            .switches
            .iter()
            .rev()
            .find_map(|(element, value)| led::requested_by(element, *value));

        let mut observed = self.observed.lock().unwrap_or_else(PoisonError::into_inner);
        match requested {
            Some(on) => {
                self.hardware.set(on);
                tracing::info!(device = DEVICE, on, "led switched");
            }
            None => {
                tracing::debug!(device = DEVICE, "no known led element, answering current level");
            }
        }
        *observed = self.hardware.is_on();
        vec![vector(*observed, VectorKind::Update)]
    }

    fn observe(&self) -> Vec<Vector> {
        let mut observed = self.observed.lock().unwrap_or_else(PoisonError::into_inner);
        let on = self.hardware.is_on();
        if on == *observed {
            return Vec::new();
        }
        *observed = on;
        vec![vector(on, VectorKind::Update)]
    }
}

impl<H: LedHardware> Driver for LedDriver<H> {
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
            Command::GetProperties(request) if request.wants(&LED) => {
                vec![vector(self.hardware.is_on(), VectorKind::Definition)]
            }
            Command::GetProperties(_) => Vec::new(),
            Command::SetSwitch(request) => self.apply(&request),
        }
    }

    async fn poll(&self) -> Vec<Vector> {
        self.observe()
    }
}

fn vector(on: bool, kind: VectorKind) -> Vector {
    Vector::Switch(SwitchVector {
        kind,
        property: &LED,
        state: PropertyState::Ok,
        timestamp: time::now(),
        switches: led::switches(on).to_vec(),
    })
}
