pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod persist;
pub mod service;
pub mod types;

pub use db::store::MarketStore;
pub use error::MartError;
pub use service::failover::MarketService;
pub use types::backup::BackupFile;
pub use types::market::{Category, NewProduct, Product, User};
