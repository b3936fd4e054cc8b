//! Threshold checks over a single metric sample.

use crate::sample::MetricSample;
use crate::thresholds::{
    MAX_DISK_USAGE_PERCENT, MAX_LOAD_AVERAGE, MAX_MEMORY_USAGE_PERCENT, MAX_NETWORK_USAGE_PERCENT,
};
use std::fmt;

/// A single threshold breach, carrying the value its message reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warning {
    /// Load average above [`MAX_LOAD_AVERAGE`].
    HighLoad { load_average: f64 },
    /// Memory usage above [`MAX_MEMORY_USAGE_PERCENT`].
    HighMemory { used_percent: f64 },
    /// Disk usage above [`MAX_DISK_USAGE_PERCENT`], reported as space left.
    LowDisk { free_mb: f64 },
    /// Bandwidth usage above [`MAX_NETWORK_USAGE_PERCENT`], reported as
    /// throughput left.
    LowBandwidth { free_mbit: f64 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::HighLoad { load_average } => {
                write!(f, "Load Average is too high: {load_average:.2}")
            }
            Warning::HighMemory { used_percent } => {
                write!(f, "Memory usage too high: {used_percent:.2}%")
            }
            Warning::LowDisk { free_mb } => {
                write!(f, "Free disk space is too low: {free_mb:.0} Mb left")
            }
            Warning::LowBandwidth { free_mbit } => {
                write!(f, "Network bandwidth usage high: {free_mbit:.2} Mbit/s available")
            }
        }
    }
}

/// Runs every threshold check against `sample`.
///
/// The checks are independent, so any subset can fire on one sample, and
/// each comparison is strictly greater-than: a value sitting exactly on
/// its limit stays quiet. Ratios are not guarded against zero totals; a
/// NaN ratio compares false and suppresses its warning, an infinite
/// ratio fires it.
pub fn evaluate(sample: &MetricSample) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if sample.load_average > MAX_LOAD_AVERAGE {
        warnings.push(Warning::HighLoad {
            load_average: sample.load_average,
        });
    }

    if sample.memory_used_percent() > MAX_MEMORY_USAGE_PERCENT {
        warnings.push(Warning::HighMemory {
            used_percent: sample.memory_used_percent(),
        });
    }

    if sample.disk_used_percent() > MAX_DISK_USAGE_PERCENT {
        warnings.push(Warning::LowDisk {
            free_mb: sample.free_disk_mb(),
        });
    }

    if sample.network_used_percent() > MAX_NETWORK_USAGE_PERCENT {
        warnings.push(Warning::LowBandwidth {
            free_mbit: sample.free_bandwidth_mbit(),
        });
    }

    warnings
}
