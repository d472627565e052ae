//! Met Office adapter error types.

use indidrive_app::ports::SourceError;

/// Errors specific to the Met Office adapter.
#[derive(Debug, thiserror::Error)]
pub enum MetOfficeError {
    /// No API key was configured.
    #[error("Met Office API key not configured")]
    MissingKey,

    /// No observation site was configured.
    #[error("no Met Office observation sites configured")]
    NoSites,

    /// The HTTP client could not be built or the request failed.
    #[error("Met Office request failed")]
    Http(#[source] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("failed to parse Met Office response")]
    Decode(#[source] serde_json::Error),

    /// The capabilities listed no observation time.
    #[error("no observation time steps available")]
    NoTimeSteps,

    /// An observation time could not be parsed.
    #[error("invalid observation time {value:?}")]
    TimeStep {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A site report had no usable temperature.
    #[error("no temperature reported by site {0}")]
    MissingTemperature(u32),
}

impl From<MetOfficeError> for SourceError {
    fn from(err: MetOfficeError) -> Self {
        SourceError(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_key_error() {
        assert_eq!(
            MetOfficeError::MissingKey.to_string(),
            "Met Office API key not configured"
        );
    }

    #[test]
    fn should_keep_cause_when_converted_to_source_error() {
        let err: SourceError = MetOfficeError::MissingTemperature(3344).into();
        assert_eq!(err.0.to_string(), "no temperature reported by site 3344");
    }

    #[test]
    fn should_display_decode_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{bad").unwrap_err();
        let err = MetOfficeError::Decode(json_err);
        assert_eq!(err.to_string(), "failed to parse Met Office response");
    }
}
