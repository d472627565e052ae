//! LED driver: a single on/off switch on stdin / stdout.

use indidrive_drivers::config::Config;
use indidrive_drivers::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    logging::init(&config.logging);

    let engine = indidrive_drivers::led_engine(&config);
    indidrive_drivers::serve_or_exit(&engine).await;
    Ok(())
}
