//! HTTP HEAD reachability probe.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::prober::UrlProber;

/// Probes a target URL with a timeout-bounded HEAD request.
///
/// Any HTTP response, including 4xx/5xx, counts as reachable; DNS failure,
/// connection refusal, and timeout do not. The probe performs no address
/// filtering: a deployment that must not reach internal networks should
/// swap in a hardened [`UrlProber`] implementation.
pub struct HttpUrlProber {
    client: reqwest::Client,
}

impl HttpUrlProber {
    /// Builds a prober whose requests are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProber for HttpUrlProber {
    async fn probe(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(url, error = %e, "Reachability probe failed");
                false
            }
        }
    }
}
