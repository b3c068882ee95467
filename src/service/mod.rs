pub mod failover;

pub use failover::MarketService;
