//! Embedded store module: schema, typed row decoders, and the store itself.
//!
//! Layout:
//! - `schema.rs`: SQL DDL bootstrapping the two core tables (SQLite)
//! - `models.rs`: row-to-entity decoders; no dynamic rows escape this module
//! - `store.rs`: the engine handle with write-through persistence

pub mod models;
pub mod schema;
pub mod store;

pub use schema::{SQLITE_INIT, ensure_schema};
pub use store::MarketStore;
