//! Per-cycle decision logic and fetch-failure accounting.

use crate::checks::{self, Warning};
use crate::sample::MetricSample;
use crate::source::{FetchError, StatsSource};
use crate::thresholds::MAX_ERROR_COUNT;
use std::fmt;

/// One line the agent prints for the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A threshold breach on a successfully fetched sample.
    Warning(Warning),
    /// The consecutive-failure streak reached [`MAX_ERROR_COUNT`].
    FetchFailure,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Warning(warning) => write!(f, "{warning}"),
            Notice::FetchFailure => write!(f, "Unable to fetch server statistic."),
        }
    }
}

/// Owns the consecutive-failure streak and turns one fetch outcome into
/// the notices that cycle should print.
///
/// Transport errors, bad statuses, unreadable bodies and malformed
/// bodies all feed the same streak. Once the streak reaches
/// [`MAX_ERROR_COUNT`], every further failing cycle repeats the
/// fetch-failure notice; only a cycle that yields a parseable sample
/// resets the streak to zero.
#[derive(Debug, Default)]
pub struct WatchEngine {
    consecutive_failures: u32,
}

impl WatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current length of the consecutive-failure streak.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Fetches one outcome from `source` and feeds it to [`Self::cycle`].
    pub async fn poll(&mut self, source: &mut dyn StatsSource) -> Vec<Notice> {
        let outcome = source.fetch_raw().await;
        self.cycle(outcome)
    }

    /// Applies one fetch outcome to the watch state.
    pub fn cycle(&mut self, outcome: Result<String, FetchError>) -> Vec<Notice> {
        let body = match outcome {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(error = %error, "Stats fetch failed");
                return self.record_failure();
            }
        };

        match body.parse::<MetricSample>() {
            Ok(sample) => {
                self.consecutive_failures = 0;
                let warnings = checks::evaluate(&sample);
                tracing::debug!(warnings = warnings.len(), "Sample evaluated");
                warnings.into_iter().map(Notice::Warning).collect()
            }
            Err(error) => {
                tracing::warn!(error = %error, "Stats response did not parse");
                self.record_failure()
            }
        }
    }

    fn record_failure(&mut self) -> Vec<Notice> {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures >= MAX_ERROR_COUNT {
            vec![Notice::FetchFailure]
        } else {
            Vec::new()
        }
    }
}
