//! Scripted transport and enumeration doubles used by the test suites.

use crate::error::{MonitorError, Result};
use crate::serial::locator::{PortDescriptor, PortEnumerator};
use crate::serial::transport::{SerialConnection, TransportFactory};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Events recorded by the fake transport, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Connected { path: String, baud_rate: u32 },
    Opened,
    Closed,
    Write(Vec<u8>),
}

#[derive(Debug, Default)]
struct TransportLog {
    events: Vec<TransportEvent>,
}

impl TransportLog {
    fn record(&mut self, event: TransportEvent) {
        self.events.push(event);
    }
}

/// Transport factory double that records connections instead of opening
/// hardware.
#[derive(Clone, Default)]
pub struct FakeFactory {
    log: Arc<Mutex<TransportLog>>,
    fail_connect: bool,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose `connect` fails, like a board that vanished between
    /// discovery and open.
    pub fn failing() -> Self {
        Self {
            fail_connect: true,
            ..Self::default()
        }
    }

    /// Everything the emitter did to the transport, in call order.
    pub fn events(&self) -> Vec<TransportEvent> {
        self.log.lock().unwrap().events.clone()
    }

    /// Just the written payloads, in write order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TransportEvent::Write(bytes) => Some(bytes),
                _ => None,
            })
            .collect()
    }
}

impl TransportFactory for FakeFactory {
    fn connect(
        &self,
        path: &str,
        baud_rate: u32,
        _timeout: Duration,
    ) -> Result<Box<dyn SerialConnection>> {
        if self.fail_connect {
            return Err(MonitorError::Serial(serialport::Error::new(
                serialport::ErrorKind::NoDevice,
                "no such device",
            )));
        }

        {
            let mut log = self.log.lock().unwrap();
            log.record(TransportEvent::Connected {
                path: path.to_string(),
                baud_rate,
            });
            log.record(TransportEvent::Opened);
        }

        Ok(Box::new(FakeConnection {
            log: Arc::clone(&self.log),
            open: true,
            path: path.to_string(),
        }))
    }
}

struct FakeConnection {
    log: Arc<Mutex<TransportLog>>,
    open: bool,
    path: String,
}

impl SerialConnection for FakeConnection {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> Result<()> {
        if !self.open {
            self.open = true;
            self.log.lock().unwrap().record(TransportEvent::Opened);
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.log.lock().unwrap().record(TransportEvent::Closed);
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if !self.open {
            return Err(MonitorError::PortClosed(self.path.clone()));
        }
        self.log
            .lock()
            .unwrap()
            .record(TransportEvent::Write(bytes.to_vec()));
        Ok(())
    }
}

/// Port enumerator double serving a fixed list.
#[derive(Debug, Clone, Default)]
pub struct FakePorts {
    ports: Vec<PortDescriptor>,
}

impl FakePorts {
    pub fn new(ports: Vec<PortDescriptor>) -> Self {
        Self { ports }
    }
}

impl PortEnumerator for FakePorts {
    fn enumerate(&self) -> Result<Vec<PortDescriptor>> {
        Ok(self.ports.clone())
    }
}
