//! Watch policy for the statwatch agent.
//!
//! Parses the seven-gauge stats line into a [`sample::MetricSample`],
//! evaluates it against the fixed [`thresholds`] via [`checks::evaluate`],
//! and accounts for consecutive fetch failures in [`engine::WatchEngine`].
//! The network sits behind the narrow [`source::StatsSource`] trait so
//! every decision in this crate can be tested without sockets.

pub mod checks;
pub mod engine;
pub mod sample;
pub mod source;
pub mod thresholds;

#[cfg(test)]
mod tests;
