//! Read-only temperature driver.
//!
//! Holds the last good [`Reading`] and refreshes it from a
//! [`TemperatureSource`] on every poll. A failing source never reaches the
//! protocol: the previous reading stays in place.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indidrive_domain::command::Command;
use indidrive_domain::property::PropertyState;
use indidrive_domain::temperature::{DEVICE, ELEMENT, Reading, TEMPERATURE};
use indidrive_domain::time;
use indidrive_domain::vector::{NumberVector, Vector, VectorKind};

use crate::driver::Driver;
use crate::ports::TemperatureSource;

/// The temperature is read-only, so only discovery is accepted.
pub const ACCEPTED_TAGS: &[&str] = &["getProperties"];

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

pub struct TemperatureDriver<S> {
    source: S,
    reading: Mutex<Reading>,
    poll_interval: Duration,
}

impl<S: TemperatureSource> TemperatureDriver<S> {
    /// `initial` is served until the source produces something better.
    #[must_use]
    pub fn new(source: S, initial: Reading, poll_interval: Duration) -> Self {
        Self {
            source,
            reading: Mutex::new(initial),
            poll_interval,
        }
    }

    #[must_use]
    pub fn reading(&self) -> Reading {
        *self.reading.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the new reading when it differs from the cached one.
    async fn refresh(&self) -> Option<Reading> {
        let current = self.reading();
        match self.source.fetch(&current).await {
            Ok(fresh) => {
                let mut reading = self.reading.lock().unwrap_or_else(PoisonError::into_inner);
                if *reading == fresh {
                    return None;
                }
                tracing::info!(device = DEVICE, value = fresh.value, "temperature updated");
                *reading = fresh;
                Some(fresh)
            }
            Err(err) => {
                tracing::warn!(
                    device = DEVICE,
                    error = %err.0,
                    value = current.value,
                    "keeping previous temperature"
                );
                None
            }
        }
    }
}

impl<S: TemperatureSource> Driver for TemperatureDriver<S> {
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
            Command::GetProperties(request) if request.wants(&TEMPERATURE) => {
                vec![definition(self.reading())]
            }
            Command::GetProperties(_) => Vec::new(),
            Command::SetSwitch(request) => {
                tracing::debug!(
                    device = %request.device,
                    name = %request.name,
                    "temperature is read-only"
                );
                Vec::new()
            }
        }
    }

    async fn poll(&self) -> Vec<Vector> {
        self.refresh().await.map(update).into_iter().collect()
    }
}

fn definition(reading: Reading) -> Vector {
    Vector::Number(NumberVector {
        kind: VectorKind::Definition,
        property: &TEMPERATURE,
        state: Some(PropertyState::Ok),
        timestamp: reading.timestamp,
        message: None,
        numbers: vec![(ELEMENT, reading.value)],
    })
}

fn update(reading: Reading) -> Vector {
    let message = format!(
        "{} [INFO] Temperature {} Centigrade received",
        time::format(&time::now()),
        reading.display_value()
    );
    Vector::Number(NumberVector {
        kind: VectorKind::Update,
        property: &TEMPERATURE,
        state: None,
        timestamp: reading.timestamp,
        message: Some(message),
        numbers: vec![(ELEMENT, reading.value)],
    })
}
