//! The capability boundary between the watch policy and the network.

use async_trait::async_trait;

/// Why a raw stats fetch failed, before any parsing.
///
/// The categories exist for diagnostics; the watch policy counts every
/// variant as the same kind of failed cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a status other than 200.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Fetches one raw stats line from the watched host.
///
/// The production implementation speaks HTTP; tests substitute scripted
/// outcomes to drive [`crate::engine::WatchEngine`] deterministically.
#[async_trait]
pub trait StatsSource: Send {
    async fn fetch_raw(&mut self) -> Result<String, FetchError>;
}
