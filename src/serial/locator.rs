//! Readout board discovery over the OS serial-port enumeration.

use crate::error::Result;
use serialport::SerialPortType;
use tracing::{debug, warn};

/// One enumerated serial device as reported by the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortDescriptor {
    /// Device path (e.g. `/dev/ttyUSB0`)
    pub path: String,
    /// Human-readable description
    pub description: String,
    /// Hardware identifier string (vendor/product/serial for USB devices)
    pub hardware_id: String,
}

impl PortDescriptor {
    /// Convenience constructor used heavily in tests.
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        hardware_id: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
            hardware_id: hardware_id.into(),
        }
    }
}

/// Source of enumerated serial devices.
///
/// Injected into [`locate`] so discovery is testable without hardware.
pub trait PortEnumerator {
    /// List the serial devices currently visible to the OS.
    fn enumerate(&self) -> Result<Vec<PortDescriptor>>;
}

/// The real OS serial-port enumeration.
pub struct SystemPorts;

impl PortEnumerator for SystemPorts {
    fn enumerate(&self) -> Result<Vec<PortDescriptor>> {
        let ports = serialport::available_ports()?;
        Ok(ports.into_iter().map(describe).collect())
    }
}

fn describe(info: serialport::SerialPortInfo) -> PortDescriptor {
    match info.port_type {
        SerialPortType::UsbPort(usb) => {
            let mut hardware_id = format!("USB VID:PID={:04X}:{:04X}", usb.vid, usb.pid);
            if let Some(serial) = &usb.serial_number {
                hardware_id.push_str(" SER=");
                hardware_id.push_str(serial);
            }

            PortDescriptor {
                path: info.port_name,
                description: usb.product.unwrap_or_else(|| "n/a".to_string()),
                hardware_id,
            }
        }
        _ => PortDescriptor {
            path: info.port_name,
            description: "n/a".to_string(),
            hardware_id: "n/a".to_string(),
        },
    }
}

/// Decides which enumerated port is the readout board.
///
/// The default matches the hard-coded Arduino UNO signature; tests and the
/// `--hardware-id` flag substitute their own.
#[derive(Debug, Clone)]
pub struct DeviceMatcher {
    hardware_id: String,
}

impl DeviceMatcher {
    /// Match the port whose hardware ID equals `hardware_id` exactly.
    pub fn hardware_id(hardware_id: impl Into<String>) -> Self {
        Self {
            hardware_id: hardware_id.into(),
        }
    }

    /// Whether this descriptor is the readout board.
    pub fn matches(&self, port: &PortDescriptor) -> bool {
        port.hardware_id == self.hardware_id
    }
}

impl Default for DeviceMatcher {
    fn default() -> Self {
        Self::hardware_id(crate::DEFAULT_HARDWARE_ID)
    }
}

/// Find the readout board among the currently connected serial devices.
///
/// Ports are sorted by path before matching, so with several candidates the
/// result does not depend on enumeration order. Returns `None` with a logged
/// diagnostic when no port matches; the caller skips transmission for the
/// cycle and discovery runs again on the next one.
pub fn locate<E: PortEnumerator>(
    enumerator: &E,
    matcher: &DeviceMatcher,
) -> Result<Option<String>> {
    let mut ports = enumerator.enumerate()?;
    ports.sort_by(|a, b| a.path.cmp(&b.path));

    for port in &ports {
        debug!("{}: {} [{}]", port.path, port.description, port.hardware_id);
        if matcher.matches(port) {
            return Ok(Some(port.path.clone()));
        }
    }

    warn!("readout board not found");
    Ok(None)
}
