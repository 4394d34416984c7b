//! Serial transport abstraction and the serialport-backed implementation.

use crate::error::{MonitorError, Result};
use std::io::Write;
use std::time::Duration;
use tracing::debug;

/// An exclusive handle to one serial device with explicit open/close state.
pub trait SerialConnection: Send {
    /// Whether the connection currently holds an open port.
    fn is_open(&self) -> bool;

    /// Open the port. Does nothing when already open.
    fn open(&mut self) -> Result<()>;

    /// Close the port. Harmless when already closed.
    fn close(&mut self);

    /// Write raw bytes to the open port.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Opens connections for the emitter.
///
/// Injected so tests can script transmissions without hardware.
pub trait TransportFactory {
    /// Open a connection to `path`, ready for writing.
    ///
    /// Fails when the device is gone or inaccessible; the error propagates to
    /// the monitoring loop.
    fn connect(
        &self,
        path: &str,
        baud_rate: u32,
        timeout: Duration,
    ) -> Result<Box<dyn SerialConnection>>;
}

/// Production transport backed by the serialport crate.
pub struct SerialportFactory;

impl TransportFactory for SerialportFactory {
    fn connect(
        &self,
        path: &str,
        baud_rate: u32,
        timeout: Duration,
    ) -> Result<Box<dyn SerialConnection>> {
        let mut connection = SerialportConnection {
            path: path.to_string(),
            baud_rate,
            timeout,
            port: None,
        };
        connection.open()?;

        Ok(Box::new(connection))
    }
}

struct SerialportConnection {
    path: String,
    baud_rate: u32,
    timeout: Duration,
    port: Option<Box<dyn serialport::SerialPort>>,
}

impl SerialConnection for SerialportConnection {
    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn open(&mut self) -> Result<()> {
        if self.port.is_none() {
            debug!("opening {} at {} baud", self.path, self.baud_rate);
            let port = serialport::new(self.path.as_str(), self.baud_rate)
                .timeout(self.timeout)
                .open()?;
            self.port = Some(port);
        }

        Ok(())
    }

    fn close(&mut self) {
        // Dropping the handle releases the device.
        self.port = None;
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| MonitorError::PortClosed(self.path.clone()))?;
        port.write_all(bytes)?;

        Ok(())
    }
}
