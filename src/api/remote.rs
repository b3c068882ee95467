use std::time::Duration;

use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::MartError;
use crate::types::market::{NewProduct, Product, User};

/// Thin typed client for the remote marketplace service. One network call per
/// method, no internal retries; failover policy lives with the coordinator.
pub struct RemoteApi {
    client: reqwest::Client,
    products_url: Url,
    login_url: Url,
}

impl RemoteApi {
    pub fn new(base: &Url) -> Result<Self, MartError> {
        let client = reqwest::Client::builder()
            .user_agent("unimart/0.1")
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            products_url: base.join("api/products/")?,
            login_url: base.join("api/auth/login/")?,
            client,
        })
    }

    /// Shared so the probe reuses the same connection pool.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, MartError> {
        let resp = self.client.get(self.products_url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(MartError::RemoteStatus(resp.status()));
        }
        let body = resp.bytes().await?;
        let mut products: Vec<Product> = serde_json::from_slice(&body)?;
        // Callers get newest-first whichever store answers; the remote is not
        // trusted to order its response.
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = products.len(), "remote product list fetched");
        Ok(products)
    }

    pub async fn create_product(&self, draft: &NewProduct) -> Result<Product, MartError> {
        let resp = self
            .client
            .post(self.products_url.clone())
            .json(draft)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(MartError::RemoteStatus(resp.status()));
        }
        let body = resp.bytes().await?;
        let mut created: Product = serde_json::from_slice(&body)?;
        // Some deployments omit the denormalized seller name on create.
        if created.seller_name.is_empty() {
            created.seller_name = draft.seller_name.clone();
        }
        Ok(created)
    }

    /// `None` is an authentication failure (negative result), distinct from a
    /// transport error: a reachable remote that rejects the handle does not
    /// trigger fallback.
    pub async fn authenticate(&self, handle: &str) -> Result<Option<User>, MartError> {
        let resp = self
            .client
            .post(self.login_url.clone())
            .json(&json!({ "username": handle }))
            .send()
            .await?;
        if !resp.status().is_success() {
            debug!(handle, status = %resp.status(), "remote rejected login");
            return Ok(None);
        }
        let body = resp.bytes().await?;
        let user: User = serde_json::from_slice(&body)?;
        Ok(Some(user))
    }
}
