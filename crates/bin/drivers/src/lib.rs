//! # indidrive-drivers
//!
//! Composition root for the driver executables.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Set up logging on stderr
//! - Construct the hardware adapters and wrap them in their drivers
//! - Build an engine over the XML codec and run it on stdin / stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no protocol logic belongs here.

pub mod config;
pub mod logging;

use indidrive_adapter_metoffice::MetOfficeSource;
use indidrive_adapter_simulated::{FixedTemperature, SimulatedDoor, SimulatedLed};
use indidrive_adapter_xml::{FrameReader, XmlCodec};
use indidrive_app::driver::Driver;
use indidrive_app::drivers::{DoorDriver, LedDriver, TemperatureDriver};
use indidrive_app::engine::{Engine, EngineError};
use indidrive_app::ports::{SourceError, SystemClock, TemperatureSource};
use indidrive_domain::temperature::Reading;
use indidrive_domain::time;
use tokio::io::BufReader;

use crate::config::Config;

pub type DoorEngine = Engine<DoorDriver<SimulatedDoor>, XmlCodec>;
pub type LedEngine = Engine<LedDriver<SimulatedLed>, XmlCodec>;
pub type TemperatureEngine = Engine<TemperatureDriver<TemperatureBackend>, XmlCodec>;

/// Temperature backend chosen from configuration.
pub enum TemperatureBackend {
    MetOffice(MetOfficeSource),
    Fixed(FixedTemperature),
}

impl TemperatureBackend {
    /// The Met Office when an API key is configured, otherwise a fixed
    /// reading at `fallback`.
    #[must_use]
    pub fn from_config(config: &Config, fallback: Reading) -> Self {
        let metoffice = &config.temperature.metoffice;
        if metoffice.api_key.is_none() {
            tracing::info!("no Met Office API key, using a fixed temperature");
            return Self::Fixed(FixedTemperature::new(fallback));
        }
        match MetOfficeSource::new(metoffice.clone()) {
            Ok(source) => Self::MetOffice(source),
            Err(err) => {
                tracing::warn!(error = %err, "Met Office unavailable, using a fixed temperature");
                Self::Fixed(FixedTemperature::new(fallback))
            }
        }
    }
}

impl TemperatureSource for TemperatureBackend {
    async fn fetch(&self, current: &Reading) -> Result<Reading, SourceError> {
        match self {
            Self::MetOffice(source) => source.fetch(current).await,
            Self::Fixed(source) => source.fetch(current).await,
        }
    }
}

#[must_use]
pub fn door_engine(config: &Config) -> DoorEngine {
    let door = SimulatedDoor::new(SystemClock, config.door.dwell());
    let driver = DoorDriver::new(door, config.door.poll_interval());
    Engine::new(driver, XmlCodec, config.engine.queue_capacity)
}

#[must_use]
pub fn led_engine(config: &Config) -> LedEngine {
    let driver = LedDriver::new(SimulatedLed::default(), config.led.poll_interval());
    Engine::new(driver, XmlCodec, config.engine.queue_capacity)
}

/// Build the temperature engine.
///
/// The fallback value is served until the first successful fetch, which the
/// engine attempts as soon as it starts.
#[must_use]
pub fn temperature_engine(config: &Config) -> TemperatureEngine {
    let fallback = Reading::new(config.temperature.fallback_value, time::now());
    let backend = TemperatureBackend::from_config(config, fallback);
    let driver = TemperatureDriver::new(backend, fallback, config.temperature.poll_interval());
    Engine::new(driver, XmlCodec, config.engine.queue_capacity)
}

/// Serve `engine` on this process's stdin and stdout until stdin closes.
///
/// # Errors
///
/// Returns [`EngineError`] when stdin or stdout fails.
pub async fn serve<D: Driver>(engine: &Engine<D, XmlCodec>) -> Result<(), EngineError> {
    let frames = FrameReader::new(
        BufReader::new(tokio::io::stdin()),
        engine.driver().accepted_tags(),
    );
    engine.run(frames, tokio::io::stdout()).await
}

/// [`serve`], terminating the process with status 1 on a stream failure.
///
/// A pending read on tokio's stdin cannot be cancelled: returning the error
/// to `main` would leave the runtime waiting for the next input byte before
/// the process could exit.
pub async fn serve_or_exit<D: Driver>(engine: &Engine<D, XmlCodec>) {
    if let Err(err) = serve(engine).await {
        tracing::error!(device = engine.driver().device(), error = ?err, "driver stopped");
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
