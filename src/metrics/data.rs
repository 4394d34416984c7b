//! Data structures for sampled system metrics.

use serde::{Deserialize, Serialize};

/// A complete set of readings for one monitoring cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Timestamp when this snapshot was taken (Unix timestamp in milliseconds)
    pub timestamp: u64,
    /// Per-core CPU usage
    pub cpu: CpuUsage,
    /// Memory and swap usage
    pub memory: MemoryUsage,
    /// Disk usage for the monitored mount points
    pub disks: DiskUsage,
}

/// Per-core CPU usage percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuUsage {
    /// Usage percentage per core (0.0 to 100.0), core 0 first
    pub per_core: Vec<f32>,
}

/// Memory and swap utilization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Memory usage percentage (0.0 to 100.0)
    pub ram_percent: f32,
    /// Swap usage percentage (0.0 to 100.0); 0.0 when no swap is configured
    pub swap_percent: f32,
}

/// Disk usage for the home and root filesystems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskUsage {
    /// Usage percentage of the filesystem holding the home mount
    pub home_percent: f32,
    /// Usage percentage of the root filesystem
    pub root_percent: f32,
}

impl MetricsSnapshot {
    /// Create a new snapshot with the current timestamp and zeroed readings.
    pub fn new() -> Self {
        Self {
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            cpu: CpuUsage::default(),
            memory: MemoryUsage::default(),
            disks: DiskUsage::default(),
        }
    }

    /// Encode the snapshot as the line frame the readout firmware expects.
    ///
    /// The frame is always 9 strings: `CPU0..CPU3`, `RAMM`, `SWAP`, `HOME`
    /// and `ROOT` readings (label immediately followed by the value, one
    /// decimal place, no separator), terminated by the
    /// [`FRAME_TERMINATOR`](crate::FRAME_TERMINATOR) sentinel. The sentinel
    /// marks the end of the frame for the emitter and is never put on the
    /// wire.
    pub fn encode_frame(&self) -> Vec<String> {
        let mut frame = Vec::with_capacity(crate::CORE_COUNT + 5);

        for (core, usage) in self.cpu.per_core.iter().take(crate::CORE_COUNT).enumerate() {
            frame.push(format!("CPU{}{:.1}", core, usage));
        }

        frame.push(format!("RAMM{:.1}", self.memory.ram_percent));
        frame.push(format!("SWAP{:.1}", self.memory.swap_percent));
        frame.push(format!("HOME{:.1}", self.disks.home_percent));
        frame.push(format!("ROOT{:.1}", self.disks.root_percent));
        frame.push(crate::FRAME_TERMINATOR.to_string());

        frame
    }
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for CpuUsage {
    fn default() -> Self {
        Self {
            per_core: Vec::new(),
        }
    }
}

impl Default for MemoryUsage {
    fn default() -> Self {
        Self {
            ram_percent: 0.0,
            swap_percent: 0.0,
        }
    }
}

impl Default for DiskUsage {
    fn default() -> Self {
        Self {
            home_percent: 0.0,
            root_percent: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: 1234567890,
            cpu: CpuUsage {
                per_core: vec![12.3, 0.0, 54.5, 100.0],
            },
            memory: MemoryUsage {
                ram_percent: 41.7,
                swap_percent: 0.0,
            },
            disks: DiskUsage {
                home_percent: 66.6,
                root_percent: 23.0,
            },
        }
    }

    #[test]
    fn frame_has_nine_elements_ending_with_done() {
        let frame = sample_snapshot().encode_frame();
        assert_eq!(frame.len(), 9);
        assert_eq!(frame.last().map(String::as_str), Some("DONE"));
    }

    #[test]
    fn frame_labels_and_values() {
        let frame = sample_snapshot().encode_frame();
        assert_eq!(
            frame,
            vec![
                "CPU012.3", "CPU10.0", "CPU254.5", "CPU3100.0", "RAMM41.7", "SWAP0.0",
                "HOME66.6", "ROOT23.0", "DONE",
            ]
        );
    }

    #[test]
    fn frame_ignores_extra_cores() {
        let mut snapshot = sample_snapshot();
        snapshot.cpu.per_core.extend([5.0, 6.0]);
        let frame = snapshot.encode_frame();
        assert_eq!(frame.len(), 9);
        assert!(frame.iter().all(|line| !line.starts_with("CPU4")));
    }
}
