//! # indidrive-adapter-metoffice
//!
//! [`TemperatureSource`] backed by the Met Office DataPoint hourly
//! observations.
//!
//! ## Algorithm
//!
//! 1. Ask the capabilities endpoint for the available observation times and
//!    take the latest one.
//! 2. If that time is the one the cached reading already carries, keep the
//!    cached reading.
//! 3. Otherwise fetch the observation at that time for every configured site,
//!    average the temperatures, subtract the altitude correction and round to
//!    one decimal place.
//!
//! Any failure is reported as a [`SourceError`]; the driver keeps its cached
//! reading.
//!
//! ## Dependency rule
//!
//! Depends on `indidrive-app` (port traits) and `indidrive-domain` only.

mod config;
mod error;
mod response;

use std::time::Duration;

use chrono::{DateTime, Utc};
use indidrive_app::ports::{SourceError, TemperatureSource};
use indidrive_domain::temperature::Reading;
use indidrive_domain::time::Timestamp;
use serde::de::DeserializeOwned;

pub use config::{DEFAULT_BASE_URL, MetOfficeConfig};
pub use error::MetOfficeError;

use response::{Capabilities, SiteReport};

/// Temperature estimated from nearby Met Office observation sites.
#[derive(Debug, Clone)]
pub struct MetOfficeSource {
    client: reqwest::Client,
    api_key: String,
    config: MetOfficeConfig,
}

impl MetOfficeSource {
    /// Build a source from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MetOfficeError::MissingKey`] without an API key,
    /// [`MetOfficeError::NoSites`] without sites, and
    /// [`MetOfficeError::Http`] if the HTTP client cannot be built.
    pub fn new(config: MetOfficeConfig) -> Result<Self, MetOfficeError> {
        let api_key = config.api_key.clone().ok_or(MetOfficeError::MissingKey)?;
        if config.sites.is_empty() {
            return Err(MetOfficeError::NoSites);
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(MetOfficeError::Http)?;
        Ok(Self {
            client,
            api_key,
            config,
        })
    }

    /// Latest reading, or `current` when no newer observation exists.
    ///
    /// # Errors
    ///
    /// Returns [`MetOfficeError`] if any request fails or any response lacks
    /// the expected fields.
    pub async fn latest(&self, current: &Reading) -> Result<Reading, MetOfficeError> {
        let step = self.latest_time_step().await?;
        let timestamp = parse_time_step(&step)?;
        if timestamp == current.timestamp {
            tracing::debug!(%step, "no newer observation");
            return Ok(*current);
        }

        let mut total = 0.0;
        let mut count = 0.0;
        for &site in &self.config.sites {
            let temperature = self.site_temperature(site, &step).await?;
            tracing::debug!(site, temperature, "site observation");
            total += temperature;
            count += 1.0;
        }
        let value = round_to_tenth(total / count - self.config.altitude_correction);
        Ok(Reading::new(value, timestamp))
    }

    async fn latest_time_step(&self) -> Result<String, MetOfficeError> {
        let url = format!("{}/capabilities", self.config.base_url);
        let capabilities: Capabilities = self
            .get(&url, &[("res", "hourly"), ("key", self.api_key.as_str())])
            .await?;
        capabilities
            .resource
            .time_steps
            .steps
            .into_last()
            .ok_or(MetOfficeError::NoTimeSteps)
    }

    async fn site_temperature(&self, site: u32, step: &str) -> Result<f64, MetOfficeError> {
        let url = format!("{}/{site}", self.config.base_url);
        let report: SiteReport = self
            .get(
                &url,
                &[("res", "hourly"), ("time", step), ("key", self.api_key.as_str())],
            )
            .await?;
        report
            .temperature()
            .ok_or(MetOfficeError::MissingTemperature(site))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MetOfficeError> {
        let body = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(MetOfficeError::Http)?
            .bytes()
            .await
            .map_err(MetOfficeError::Http)?;
        serde_json::from_slice(&body).map_err(MetOfficeError::Decode)
    }
}

impl TemperatureSource for MetOfficeSource {
    async fn fetch(&self, current: &Reading) -> Result<Reading, SourceError> {
        Ok(self.latest(current).await?)
    }
}

/// Observation times look like `2024-03-20T12:00:00Z`.
fn parse_time_step(step: &str) -> Result<Timestamp, MetOfficeError> {
    DateTime::parse_from_rfc3339(step)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| MetOfficeError::TimeStep {
            value: step.to_string(),
            source,
        })
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
