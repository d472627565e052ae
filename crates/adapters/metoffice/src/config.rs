//! Met Office DataPoint configuration.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://datapoint.metoffice.gov.uk/public/data/val/wxobs/all/json";

/// Configuration for the Met Office temperature source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetOfficeConfig {
    /// DataPoint API key. Without one the source cannot be built.
    pub api_key: Option<String>,
    /// Observation endpoint, without trailing slash.
    pub base_url: String,
    /// Observation site ids averaged into one reading.
    pub sites: Vec<u32>,
    /// Subtracted from the site average, in degrees Centigrade.
    pub altitude_correction: f64,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for MetOfficeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            // Bingley and Stonyhurst
            sites: vec![3344, 99060],
            altitude_correction: 0.25,
            timeout_secs: 30,
        }
    }
}
