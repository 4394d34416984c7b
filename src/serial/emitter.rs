//! Frame transmission to the readout board.

use crate::error::Result;
use crate::serial::config::LinkConfig;
use crate::serial::transport::TransportFactory;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Writes metric frames to the located readout board.
pub struct SerialEmitter<F: TransportFactory> {
    factory: F,
    config: LinkConfig,
}

impl<F: TransportFactory> SerialEmitter<F> {
    /// Create an emitter over the given transport.
    pub fn new(factory: F, config: LinkConfig) -> Self {
        Self { factory, config }
    }

    /// The link configuration this emitter was built with.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Transmit every element of `frame` except the trailing sentinel, each
    /// as `<line>\n`, pausing the configured delay after each write.
    ///
    /// A `None` target means no board was located this cycle: the frame is
    /// dropped with a warning and the call still succeeds, so the loop
    /// retries discovery next cycle. Open and write failures propagate.
    pub async fn send_frame(&self, target: Option<&str>, frame: &[String]) -> Result<()> {
        let Some(path) = target else {
            warn!("send to serial port failed: no readout board");
            return Ok(());
        };

        let mut connection =
            self.factory
                .connect(path, self.config.baud_rate, self.config.read_timeout())?;

        // Cycle the port so the write always starts on a freshly opened one.
        connection.close();
        if connection.is_open() {
            debug!("port {} is already open", path);
        } else {
            connection.open()?;
        }

        let end = frame.len().saturating_sub(1);
        for line in &frame[..end] {
            let mut bytes = Vec::with_capacity(line.len() + 1);
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
            connection.write(&bytes)?;
            sleep(self.config.write_delay()).await;
        }

        connection.close();
        Ok(())
    }
}
