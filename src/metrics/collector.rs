//! Core system metrics collection implementation.

use crate::error::{MonitorError, Result};
use crate::metrics::{data::*, traits::MetricsProvider};
use futures_util::stream::{self, BoxStream};
use std::path::Path;
use std::time::Duration;
use sysinfo::{Disks, System};
use tokio::time;

/// System metrics collector backed by sysinfo.
pub struct SystemCollector {
    system: System,
    disks: Disks,
    sample_window: Duration,
}

impl SystemCollector {
    /// Create a new collector with the default 1 s CPU sampling window.
    pub fn new() -> Result<Self> {
        Self::with_sample_window(Duration::from_millis(crate::DEFAULT_SAMPLE_WINDOW_MS))
    }

    /// Create a collector with a custom CPU sampling window.
    pub fn with_sample_window(sample_window: Duration) -> Result<Self> {
        let mut system = System::new_all();
        system.refresh_all();
        let mut disks = Disks::new_with_refreshed_list();
        disks.refresh();

        Ok(Self {
            system,
            disks,
            sample_window,
        })
    }

    /// Sample per-core CPU usage over the configured window.
    ///
    /// Usage is computed between two refreshes, so this blocks for the full
    /// window. At least [`CORE_COUNT`](crate::CORE_COUNT) cores must be
    /// present since the readout displays exactly that many.
    async fn sample_cpu(&mut self) -> Result<CpuUsage> {
        self.system.refresh_cpu_usage();
        time::sleep(self.sample_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;
        self.system.refresh_cpu_usage();

        let cpus = self.system.cpus();
        if cpus.len() < crate::CORE_COUNT {
            return Err(MonitorError::metrics_error(format!(
                "readout expects {} cpu cores, host reports {}",
                crate::CORE_COUNT,
                cpus.len()
            )));
        }

        Ok(CpuUsage {
            per_core: cpus.iter().map(|cpu| cpu.cpu_usage()).collect(),
        })
    }

    /// Read memory and swap utilization.
    fn collect_memory(&mut self) -> MemoryUsage {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        let ram_percent = if total > 0 {
            let used = total.saturating_sub(self.system.available_memory());
            (used as f32 / total as f32) * 100.0
        } else {
            0.0
        };

        let total_swap = self.system.total_swap();
        let swap_percent = if total_swap > 0 {
            (self.system.used_swap() as f32 / total_swap as f32) * 100.0
        } else {
            0.0
        };

        MemoryUsage {
            ram_percent,
            swap_percent,
        }
    }

    /// Read disk usage for the two monitored mount points.
    fn collect_disks(&mut self) -> Result<DiskUsage> {
        self.disks.refresh();

        Ok(DiskUsage {
            home_percent: self.usage_for_path(Path::new(crate::HOME_MOUNT))?,
            root_percent: self.usage_for_path(Path::new(crate::ROOT_MOUNT))?,
        })
    }

    /// Resolve a path to the filesystem with the longest matching mount
    /// point, so `/home` falls back to the root filesystem when it is not a
    /// separate mount.
    fn usage_for_path(&self, path: &Path) -> Result<f32> {
        let disk = self
            .disks
            .iter()
            .filter(|disk| path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .ok_or_else(|| {
                MonitorError::metrics_error(format!(
                    "no filesystem found for {}",
                    path.display()
                ))
            })?;

        let total = disk.total_space();
        if total == 0 {
            return Ok(0.0);
        }

        let used = total - disk.available_space();
        Ok((used as f32 / total as f32) * 100.0)
    }
}

impl MetricsProvider for SystemCollector {
    async fn collect_snapshot(&mut self) -> Result<MetricsSnapshot> {
        let mut snapshot = MetricsSnapshot::new();
        snapshot.cpu = self.sample_cpu().await?;
        snapshot.memory = self.collect_memory();
        snapshot.disks = self.collect_disks()?;

        Ok(snapshot)
    }

    async fn start_stream(
        &mut self,
        interval_ms: u64,
    ) -> Result<BoxStream<'static, MetricsSnapshot>> {
        let interval = Duration::from_millis(interval_ms);
        let collector = SystemCollector::with_sample_window(self.sample_window)?;

        let stream = stream::unfold(
            (collector, time::interval(interval)),
            |(mut collector, mut interval)| async move {
                interval.tick().await;
                match collector.collect_snapshot().await {
                    Ok(snapshot) => Some((snapshot, (collector, interval))),
                    Err(err) => {
                        tracing::error!("Failed to collect metrics snapshot: {}", err);
                        None
                    }
                }
            },
        );

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collector_creation() {
        let collector = SystemCollector::new();
        assert!(collector.is_ok());
    }

    #[tokio::test]
    async fn test_memory_readings_in_range() {
        let mut collector = SystemCollector::new().unwrap();
        let memory = collector.collect_memory();
        assert!((0.0..=100.0).contains(&memory.ram_percent));
        assert!((0.0..=100.0).contains(&memory.swap_percent));
    }

    #[tokio::test]
    async fn test_snapshot_collection() {
        let mut collector =
            SystemCollector::with_sample_window(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL).unwrap();

        // Containers may report fewer cores or no mounted disks; only assert
        // on the shape when sampling succeeds.
        if let Ok(snapshot) = collector.collect_snapshot().await {
            assert!(snapshot.timestamp > 0);
            assert!(snapshot.cpu.per_core.len() >= crate::CORE_COUNT);
            let frame = snapshot.encode_frame();
            assert_eq!(frame.len(), 9);
        }
    }
}
