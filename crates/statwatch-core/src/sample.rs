//! The stats line and its parser.

use crate::thresholds::METRIC_FIELDS;
use std::str::FromStr;

/// One polled reading of the watched host.
///
/// Wire order: load average, total memory, used memory, total disk,
/// used disk, total bandwidth, used bandwidth. Totals are expected to
/// be nonzero upstream; a zero total makes the derived percentage NaN
/// or infinite and the threshold comparison decides from there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub load_average: f64,
    pub total_memory: f64,
    pub used_memory: f64,
    pub total_disk: f64,
    pub used_disk: f64,
    pub total_bandwidth: f64,
    pub used_bandwidth: f64,
}

impl MetricSample {
    /// Used memory as a percentage of total memory.
    pub fn memory_used_percent(&self) -> f64 {
        self.used_memory / self.total_memory * 100.0
    }

    /// Used disk space as a percentage of total disk space.
    pub fn disk_used_percent(&self) -> f64 {
        self.used_disk / self.total_disk * 100.0
    }

    /// Used bandwidth as a percentage of total bandwidth.
    pub fn network_used_percent(&self) -> f64 {
        self.used_bandwidth / self.total_bandwidth * 100.0
    }

    /// Unused disk space in megabytes.
    pub fn free_disk_mb(&self) -> f64 {
        (self.total_disk - self.used_disk) / 1_000_000.0
    }

    /// Unused bandwidth in megabits per second.
    pub fn free_bandwidth_mbit(&self) -> f64 {
        (self.total_bandwidth - self.used_bandwidth) * 10.0 / 1_000_000.0
    }
}

/// Why a stats response body failed to parse.
///
/// # Examples
///
/// ```rust
/// use statwatch_core::sample::MetricSample;
///
/// let err = "1,2,3".parse::<MetricSample>().unwrap_err();
/// assert!(err.to_string().contains("comma-separated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line did not split into exactly seven fields.
    #[error("expected 7 comma-separated fields, got {found}")]
    FieldCount { found: usize },

    /// A field was present but not a number.
    #[error("field {index} is not a number: '{value}'")]
    InvalidNumber { index: usize, value: String },
}

impl FromStr for MetricSample {
    type Err = ParseError;

    /// Parses a stats line.
    ///
    /// The whole line is trimmed before splitting and each field is
    /// trimmed again before the numeric parse, so `" 1.0, 2.0,..."`
    /// and a trailing newline are both accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(',').map(str::trim).collect();
        if fields.len() != METRIC_FIELDS {
            return Err(ParseError::FieldCount {
                found: fields.len(),
            });
        }

        let mut values = [0.0_f64; METRIC_FIELDS];
        for (index, field) in fields.iter().enumerate() {
            values[index] = field.parse().map_err(|_| ParseError::InvalidNumber {
                index,
                value: (*field).to_string(),
            })?;
        }

        Ok(Self {
            load_average: values[0],
            total_memory: values[1],
            used_memory: values[2],
            total_disk: values[3],
            used_disk: values[4],
            total_bandwidth: values[5],
            used_bandwidth: values[6],
        })
    }
}
