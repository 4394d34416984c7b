//! # serial_sysmon - System Metrics over Serial
//!
//! A small Rust crate that samples host system metrics (per-core CPU, memory,
//! swap, disk usage) and pushes them as newline-delimited text tokens over a
//! serial link to an attached Arduino readout. The readout board is
//! rediscovered on every cycle by matching its USB hardware identifier
//! against the OS serial-port enumeration, so unplugging and replugging the
//! board just works.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serial_sysmon::{
//!     metrics::{MetricsProvider, SystemCollector},
//!     serial::{locate, DeviceMatcher, LinkConfig, SerialEmitter, SerialportFactory, SystemPorts},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut collector = SystemCollector::new()?;
//!     let emitter = SerialEmitter::new(SerialportFactory, LinkConfig::default());
//!     let matcher = DeviceMatcher::hardware_id(serial_sysmon::DEFAULT_HARDWARE_ID);
//!
//!     loop {
//!         let target = locate(&SystemPorts, &matcher)?;
//!         let snapshot = collector.collect_snapshot().await?;
//!         emitter.send_frame(target.as_deref(), &snapshot.encode_frame()).await?;
//!     }
//! }
//! ```

pub mod error;
pub mod metrics;
pub mod serial;

// Re-export public API
pub use error::{MonitorError, Result};
pub use metrics::{
    collector::SystemCollector,
    data::{CpuUsage, DiskUsage, MemoryUsage, MetricsSnapshot},
    traits::MetricsProvider,
};
pub use serial::{
    config::LinkConfig,
    emitter::SerialEmitter,
    locator::{locate, DeviceMatcher, PortDescriptor, PortEnumerator, SystemPorts},
    transport::{SerialConnection, SerialportFactory, TransportFactory},
};

/// Number of CPU cores the readout displays. Hosts with fewer cores are
/// rejected at sampling time.
pub const CORE_COUNT: usize = 4;

/// The default serial baud rate, matching the readout firmware.
pub const DEFAULT_BAUD_RATE: u32 = 19_200;

/// The default serial read timeout in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 500;

/// The default pause after each transmitted line in milliseconds.
pub const DEFAULT_WRITE_DELAY_MS: u64 = 100;

/// The default idle delay between monitoring cycles in milliseconds.
pub const DEFAULT_IDLE_DELAY_MS: u64 = 500;

/// The default CPU sampling window in milliseconds.
pub const DEFAULT_SAMPLE_WINDOW_MS: u64 = 1_000;

/// USB hardware identifier of the Arduino UNO readout board.
pub const DEFAULT_HARDWARE_ID: &str =
    "USB VID:PID=2341:0001 SER=74132343530351F05052 LOCATION=3-10:1.0";

/// Mount point sampled for the HOME usage line.
pub const HOME_MOUNT: &str = "/home";

/// Mount point sampled for the ROOT usage line.
pub const ROOT_MOUNT: &str = "/";

/// Terminal sentinel appended to every encoded frame; never transmitted.
pub const FRAME_TERMINATOR: &str = "DONE";
