//! Protocol engine — runs one driver against an input and an output stream.
//!
//! Three duties run concurrently on the current task:
//! - **read/dispatch**: pull frames, decode them and hand commands to the
//!   driver, queueing whatever it answers;
//! - **poll/notify**: sample the driver right away, then on its own period,
//!   and queue the updates it reports;
//! - **drain/write**: write queued messages, one per line, in FIFO order.
//!
//! All of them share the [`Outbox`]. The end of the input stops reading and
//! polling; the writer then drains what is left and the engine returns.

use std::time::Duration;

use indidrive_domain::vector::Vector;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::MissedTickBehavior;

use crate::driver::Driver;
use crate::outbox::Outbox;
use crate::ports::{FrameSource, WireCodec};

/// Stream-level failure. Always fatal for the driver process.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read input stream")]
    Read(#[source] std::io::Error),
    #[error("failed to write output stream")]
    Write(#[source] std::io::Error),
}

pub struct Engine<D, C> {
    driver: D,
    codec: C,
    outbox: Outbox,
}

impl<D: Driver, C: WireCodec> Engine<D, C> {
    /// `capacity` bounds the number of messages waiting to be written.
    #[must_use]
    pub fn new(driver: D, codec: C, capacity: usize) -> Self {
        Self {
            driver,
            codec,
            outbox: Outbox::new(capacity),
        }
    }

    #[must_use]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Serve until the input ends.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] as soon as reading or writing fails. Frames
    /// that cannot be decoded are logged and skipped.
    pub async fn run<F, W>(&self, mut frames: F, mut output: W) -> Result<(), EngineError>
    where
        F: FrameSource,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(device = self.driver.device(), "driver started");

        let inbound = async {
            let result = tokio::select! {
                result = self.read_loop(&mut frames) => result,
                () = self.update_loop() => Ok(()),
            };
            self.outbox.close();
            result
        };

        tokio::try_join!(inbound, self.write_loop(&mut output))?;
        tracing::info!(device = self.driver.device(), "driver stopped");
        Ok(())
    }

    async fn read_loop<F: FrameSource>(&self, frames: &mut F) -> Result<(), EngineError> {
        while let Some(frame) = frames.next_frame().await.map_err(EngineError::Read)? {
            match self.codec.decode(&frame) {
                Ok(command) => self.publish(self.driver.handle(command)),
                Err(err) => tracing::debug!(
                    tag = frame.tag,
                    len = frame.bytes.len(),
                    error = %err,
                    "dropping undecodable frame"
                ),
            }
        }
        tracing::debug!(device = self.driver.device(), "input closed");
        Ok(())
    }

    async fn update_loop(&self) {
        let period = self.driver.poll_interval().max(Duration::from_millis(1));
        // first tick completes at once, so the device is sampled on start-up
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let vectors = self.driver.poll().await;
            self.publish(vectors);
        }
    }

    async fn write_loop<W: AsyncWrite + Unpin>(&self, output: &mut W) -> Result<(), EngineError> {
        while let Some(message) = self.outbox.drain().await {
            output.write_all(&message).await.map_err(EngineError::Write)?;
            output.write_all(b"\n").await.map_err(EngineError::Write)?;
            output.flush().await.map_err(EngineError::Write)?;
        }
        Ok(())
    }

    fn publish(&self, vectors: Vec<Vector>) {
        for vector in vectors {
            match self.codec.encode(&vector) {
                Ok(message) => {
                    if let Some(dropped) = self.outbox.push(message) {
                        tracing::warn!(len = dropped.len(), "outbox full, dropped oldest message");
                    }
                }
                Err(err) => {
                    tracing::error!(tag = vector.tag(), error = %err, "failed to encode vector");
                }
            }
        }
    }
}
