use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::probe::ConnectivityProbe;
use crate::api::remote::RemoteApi;
use crate::config::Config;
use crate::db::store::MarketStore;
use crate::error::MartError;
use crate::types::backup::BackupFile;
use crate::types::market::{NewProduct, Product, User};

/// Best-effort-remote, fallback-local router. The façade the rest of the
/// application consumes: every logical operation probes the remote first,
/// uses it when reachable, and degrades silently to the embedded store when
/// the probe fails or the remote call itself does.
///
/// When the remote serves a request it is the system of record; the local
/// store is deliberately not updated and the two are never reconciled.
pub struct MarketService {
    probe: ConnectivityProbe,
    remote: RemoteApi,
    // Explicit handle, no ambient global. The mutex serialises mutations:
    // one write-through completes before the next statement runs.
    store: Mutex<MarketStore>,
}

impl MarketService {
    pub fn new(cfg: &Config, store: MarketStore) -> Result<Self, MartError> {
        let remote = RemoteApi::new(&cfg.remote_base_url)?;
        let probe = ConnectivityProbe::new(
            remote.client().clone(),
            &cfg.remote_base_url,
            Duration::from_millis(cfg.probe_timeout_ms),
        )?;
        Ok(Self {
            probe,
            remote,
            store: Mutex::new(store),
        })
    }

    /// Items ordered by creation time descending, whichever store answers.
    pub async fn list_products(&self) -> Result<Vec<Product>, MartError> {
        if self.probe.is_reachable().await {
            match self.remote.list_products().await {
                Ok(products) => return Ok(products),
                Err(e) if e.is_degradable() => {
                    warn!(error = %e, "remote list failed, serving local store");
                }
                Err(e) => return Err(e),
            }
        } else {
            debug!("remote unreachable, serving local store");
        }
        self.store.lock().await.list_products()
    }

    /// List an item. A locally created product gets a generated id and the
    /// same shape the remote would have returned; the insert is durably
    /// persisted before this returns.
    pub async fn create_product(&self, draft: NewProduct) -> Result<Product, MartError> {
        if self.probe.is_reachable().await {
            match self.remote.create_product(&draft).await {
                Ok(product) => return Ok(product),
                Err(e) if e.is_degradable() => {
                    warn!(error = %e, title = %draft.title, "remote create failed, storing locally");
                }
                Err(e) => return Err(e),
            }
        } else {
            debug!(title = %draft.title, "remote unreachable, storing locally");
        }
        self.store.lock().await.create_product(&draft)
    }

    /// Log in with a handle. A reachable remote that rejects the handle is a
    /// negative result, not an error, and does not fall back; the local path
    /// registers unseen handles on first use.
    pub async fn authenticate(&self, handle: &str) -> Result<Option<User>, MartError> {
        if self.probe.is_reachable().await {
            match self.remote.authenticate(handle).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) if e.is_degradable() => {
                    warn!(error = %e, handle, "remote login failed, using local accounts");
                }
                Err(e) => return Err(e),
            }
        } else {
            debug!(handle, "remote unreachable, using local accounts");
        }
        self.store.lock().await.authenticate(handle).map(Some)
    }

    /// Current store image, named for writing out as a standalone file.
    pub async fn export_backup(&self) -> Result<BackupFile, MartError> {
        let bytes = self.store.lock().await.export()?;
        Ok(BackupFile::new(bytes, Utc::now()))
    }

    /// Replace the entire local dataset with an imported image. The handle
    /// stays valid afterwards; no process restart involved.
    pub async fn import_backup(&self, bytes: &[u8]) -> Result<(), MartError> {
        self.store.lock().await.reinitialize(bytes)
    }

    /// Byte length of the persisted image. Diagnostics.
    pub async fn persisted_size(&self) -> Result<u64, MartError> {
        self.store.lock().await.persisted_size()
    }

    /// One probe round-trip; exposed for startup diagnostics.
    pub async fn remote_reachable(&self) -> bool {
        self.probe.is_reachable().await
    }
}
