use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::LazyLock;
use url::Url;

/// Runtime configuration, resolved once at startup from defaults overlaid
/// with `UNIMART_`-prefixed environment variables (e.g. `UNIMART_REMOTE_BASE_URL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base address of the remote marketplace service. Must end with a slash
    /// so endpoint paths join underneath it.
    pub remote_base_url: Url,
    /// Budget for the liveness probe; this check gates every operation, so it
    /// stays short enough not to stall an offline user.
    pub probe_timeout_ms: u64,
    /// Where the serialized store image lives between runs.
    pub store_path: PathBuf,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_base_url: Url::parse("http://127.0.0.1:8000/")
                .expect("default remote base URL is valid"),
            probe_timeout_ms: 1500,
            store_path: PathBuf::from("unimart.db"),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("UNIMART_"))
            .extract()
    }
}

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("invalid UNIMART_* configuration"));
