//! Temperature driver: a read-only number refreshed from the Met Office, or a
//! fixed value when no API key is configured.

use indidrive_drivers::config::Config;
use indidrive_drivers::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    logging::init(&config.logging);

    let engine = indidrive_drivers::temperature_engine(&config);
    indidrive_drivers::serve_or_exit(&engine).await;
    Ok(())
}
