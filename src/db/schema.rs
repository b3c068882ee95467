//! SQL DDL for the embedded marketplace store.

use rusqlite::Connection;

use crate::error::MartError;

/// SQLite schema with:
/// - `users.id` / `products.id` TEXT PRIMARY KEY (ids are strings, assigned at creation)
/// - `username` UNIQUE so a login handle resolves to at most one account
/// - `seller_id` as a soft reference; no foreign key on purpose
/// - `price` guarded non-negative at the engine
/// - `created_at` defaulted by the engine to insertion time (UTC)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    college TEXT NOT NULL DEFAULT '',
    avatar TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    seller_id TEXT NOT NULL,
    seller_name TEXT NOT NULL DEFAULT '',
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price INTEGER NOT NULL CHECK (price >= 0),
    category TEXT NOT NULL DEFAULT 'Other',
    condition TEXT NOT NULL DEFAULT '',
    image TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_products_created_at ON products(created_at);
"#;

/// Apply the DDL batch. Idempotent: every statement uses IF NOT EXISTS, so
/// calling this on an already-initialised store is a no-op.
pub fn ensure_schema(conn: &Connection) -> Result<(), MartError> {
    conn.execute_batch(SQLITE_INIT)?;
    Ok(())
}
