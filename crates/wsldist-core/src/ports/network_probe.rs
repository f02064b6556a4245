//! Network addressing port for running distributions.

use std::net::Ipv4Addr;

use super::ListingError;

/// Resolves addresses by running commands inside a distribution.
///
/// Calls may start the distribution and are slow; `Distribution` caches the
/// first successful answer.
pub trait NetworkProbe: Send + Sync {
    /// Address of the distribution's primary interface.
    fn wsl_ip(&self, ms_id: &str) -> Result<Ipv4Addr, ListingError>;

    /// Address of the Windows host (the distribution's default gateway).
    fn host_ip(&self, ms_id: &str) -> Result<Ipv4Addr, ListingError>;
}
