use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use unimart::persist::FileBlobStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &unimart::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        remote_base_url = %cfg.remote_base_url,
        store_path = %cfg.store_path.display(),
        probe_timeout_ms = cfg.probe_timeout_ms,
        loglevel = %cfg.loglevel
    );

    let blobs = Box::new(FileBlobStore::new(cfg.store_path.clone()));
    let store = unimart::MarketStore::open(blobs)?;
    let service = unimart::MarketService::new(cfg, store)?;

    let reachable = service.remote_reachable().await;
    let products = service.list_products().await?;
    info!(
        reachable,
        products = products.len(),
        persisted_bytes = service.persisted_size().await?,
        "data layer ready; reads served {}",
        if reachable { "remotely" } else { "from the local store" }
    );
    Ok(())
}
