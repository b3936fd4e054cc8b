//! Fixed operating limits for the watched host.
//!
//! The agent has no runtime configuration surface; every knob is a
//! compile-time constant here.

use std::time::Duration;

/// Number of comma-separated gauges in a stats response line.
pub const METRIC_FIELDS: usize = 7;

/// Warn when the reported load average exceeds this.
pub const MAX_LOAD_AVERAGE: f64 = 30.0;

/// Warn when used memory exceeds this share of total memory.
pub const MAX_MEMORY_USAGE_PERCENT: f64 = 80.0;

/// Warn when used disk exceeds this share of total disk.
pub const MAX_DISK_USAGE_PERCENT: f64 = 90.0;

/// Warn when used bandwidth exceeds this share of total bandwidth.
pub const MAX_NETWORK_USAGE_PERCENT: f64 = 90.0;

/// Consecutive failed cycles before the fetch-failure notice is emitted.
pub const MAX_ERROR_COUNT: u32 = 3;

/// Wall-clock pause between polling cycles.
pub const CHECK_INTERVAL: Duration = Duration::from_secs(10);
