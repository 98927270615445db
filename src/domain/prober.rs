//! Reachability probe contract.

use async_trait::async_trait;

/// Best-effort reachability check performed once at link creation time.
///
/// Implementations must be bounded by a timeout: a hanging target host must
/// not tie up a request handler. Any HTTP response, including 4xx/5xx,
/// counts as reachable; only transport-level failure (DNS, connection
/// refused, timeout) does not.
///
/// The probe is a server-initiated request to a caller-supplied URL and is
/// therefore an SSRF surface. This contract is kept narrow so a hardened
/// implementation can add address-class filtering (loopback, link-local,
/// metadata services) without touching the lifecycle engine; the default
/// [`crate::infrastructure::probe::HttpUrlProber`] performs no such
/// filtering.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlProber: Send + Sync {
    /// Returns `true` when the target answered with any HTTP response.
    async fn probe(&self, url: &str) -> bool;
}
