//! Error handling for the serial_sysmon crate.

/// A specialized `Result` type for serial_sysmon operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// The main error type for monitoring and transmission operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serial transport operation failed
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// Write attempted on a connection that is not open
    #[error("serial port {0} is not open")]
    PortClosed(String),

    /// Metrics collection failed
    #[error("metrics error: {0}")]
    Metrics(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl MonitorError {
    /// Create a new metrics error
    pub fn metrics_error(msg: impl Into<String>) -> Self {
        Self::Metrics(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
