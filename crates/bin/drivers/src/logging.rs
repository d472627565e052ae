//! Logging setup.
//!
//! stdout carries the protocol, so every log line goes to stderr.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const FALLBACK_FILTER: &str = "indidrive=info";

/// Install the global subscriber. A malformed filter falls back to
/// `indidrive=info`; a second call is a no-op.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {:?}: {err}", config.filter);
        EnvFilter::new(FALLBACK_FILTER)
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_tolerate_repeated_and_malformed_setup() {
        init(&LoggingConfig {
            filter: "indidrive=debug".to_string(),
        });
        init(&LoggingConfig {
            filter: "[[[".to_string(),
        });
    }
}
