//! Port used by readiness checks to confirm storage is reachable.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by connectivity probes.
    pub enum ConnectivityProbeError {
        /// The backing store did not answer.
        Unreachable { message: String } => "storage unreachable: {message}",
    }
}

/// Trivial round trip against the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Perform one round trip (`SELECT 1` for SQL stores).
    async fn ping(&self) -> Result<(), ConnectivityProbeError>;
}

/// Probe that always succeeds; used with the in-memory adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureConnectivityProbe;

#[async_trait]
impl ConnectivityProbe for FixtureConnectivityProbe {
    async fn ping(&self) -> Result<(), ConnectivityProbeError> {
        Ok(())
    }
}
