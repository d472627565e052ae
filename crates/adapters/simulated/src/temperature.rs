//! Temperature source that never changes, for running without a backend.

use indidrive_app::ports::{SourceError, TemperatureSource};
use indidrive_domain::temperature::Reading;

#[derive(Debug, Clone, Copy)]
pub struct FixedTemperature {
    reading: Reading,
}

impl FixedTemperature {
    #[must_use]
    pub fn new(reading: Reading) -> Self {
        Self { reading }
    }
}

impl TemperatureSource for FixedTemperature {
    async fn fetch(&self, _current: &Reading) -> Result<Reading, SourceError> {
        Ok(self.reading)
    }
}

#[cfg(test)]
mod tests {
    use indidrive_domain::time::now;

    use super::*;

    #[tokio::test]
    async fn should_always_report_same_reading() {
        let reading = Reading::new(9.5, now());
        let source = FixedTemperature::new(reading);
        let other = Reading::new(1.0, now());
        assert_eq!(source.fetch(&other).await.unwrap(), reading);
        assert_eq!(source.fetch(&reading).await.unwrap(), reading);
    }
}
