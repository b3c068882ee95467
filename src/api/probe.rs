use std::time::Duration;

use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::error::MartError;

/// Bounded liveness check against the remote service. Gates every logical
/// operation, so the timeout stays short.
pub struct ConnectivityProbe {
    client: reqwest::Client,
    target: Url,
    timeout: Duration,
}

impl ConnectivityProbe {
    /// Probes `OPTIONS {base}/api/products/`, a capability check rather than
    /// a data fetch.
    pub fn new(client: reqwest::Client, base: &Url, timeout: Duration) -> Result<Self, MartError> {
        Ok(Self {
            client,
            target: base.join("api/products/")?,
            timeout,
        })
    }

    /// Infallible by contract: true only on a 2xx response within the
    /// timeout; DNS failure, refused connection, timeout, and non-2xx all
    /// come back as unreachable.
    pub async fn is_reachable(&self) -> bool {
        let outcome = self
            .client
            .request(Method::OPTIONS, self.target.clone())
            .timeout(self.timeout)
            .send()
            .await;
        match outcome {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                debug!(status = %resp.status(), "probe answered non-2xx, treating remote as unreachable");
                false
            }
            Err(e) => {
                debug!(error = %e, "probe failed, treating remote as unreachable");
                false
            }
        }
    }
}
