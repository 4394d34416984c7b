//! Traits for system metrics collection.

use crate::error::Result;
use crate::metrics::data::MetricsSnapshot;
use futures_util::stream::BoxStream;

/// Trait for collecting system metrics.
///
/// The monitoring loop and the CLI commands only depend on this trait, so
/// tests can substitute a scripted provider for the sysinfo-backed one.
pub trait MetricsProvider {
    /// Collect a single snapshot of system metrics.
    ///
    /// Blocks the caller for roughly the CPU sampling window; this is the
    /// dominant latency of each monitoring cycle.
    fn collect_snapshot(
        &mut self,
    ) -> impl std::future::Future<Output = Result<MetricsSnapshot>> + Send;

    /// Start continuous collection of system metrics.
    ///
    /// Returns a stream of snapshots collected at the specified interval.
    fn start_stream(
        &mut self,
        interval_ms: u64,
    ) -> impl std::future::Future<Output = Result<BoxStream<'static, MetricsSnapshot>>> + Send;
}
