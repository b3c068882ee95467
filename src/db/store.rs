use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::db::models;
use crate::db::schema::ensure_schema;
use crate::error::MartError;
use crate::persist::BlobStore;
use crate::types::market::{NewProduct, Product, User};

pub(crate) const PRODUCT_COLUMNS: &str =
    "id, seller_id, seller_name, title, description, price, category, condition, image, created_at";

const USER_COLUMNS: &str = "id, username, college, avatar";

/// One live embedded engine hosted on a private scratch file. The serialized
/// image is the SQLite main-database file format, so an exported blob can be
/// reopened by any SQLite build.
struct Engine {
    conn: Connection,
    scratch: NamedTempFile,
}

impl Engine {
    fn fresh() -> Result<Self, MartError> {
        let scratch = NamedTempFile::new()?;
        let conn = Connection::open(scratch.path())?;
        Ok(Self { conn, scratch })
    }

    /// Materialise an engine from a serialized image. A blob SQLite refuses
    /// to open is reported as `CorruptStore`; the caller decides whether to
    /// recover or surface it.
    fn from_image(bytes: &[u8]) -> Result<Self, MartError> {
        let scratch = NamedTempFile::new()?;
        std::fs::write(scratch.path(), bytes)?;
        let conn =
            Connection::open(scratch.path()).map_err(|e| MartError::CorruptStore(e.to_string()))?;
        // SQLite opens lazily; force a header read so a foreign or truncated
        // image fails here instead of on the first query.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| MartError::CorruptStore(e.to_string()))?;
        Ok(Self { conn, scratch })
    }

    /// Full serialized state. Valid whenever no transaction is in flight,
    /// which holds between calls since every statement autocommits.
    fn image(&self) -> Result<Vec<u8>, MartError> {
        Ok(std::fs::read(self.scratch.path())?)
    }
}

/// The embedded store handle: owns the engine, decodes rows through typed
/// models, and persists the full image through the blob adapter after every
/// mutation (write-through, not write-back).
pub struct MarketStore {
    engine: Engine,
    blobs: Box<dyn BlobStore>,
    seq: u64,
}

impl MarketStore {
    /// Open the store from whatever the adapter currently holds. An absent
    /// image bootstraps a fresh engine; a corrupt image is discarded with a
    /// warning and replaced by a fresh one. Never fatal.
    pub fn open(blobs: Box<dyn BlobStore>) -> Result<Self, MartError> {
        let engine = match blobs.load()? {
            Some(bytes) if !bytes.is_empty() => match Engine::from_image(&bytes) {
                Ok(engine) => engine,
                Err(e) => {
                    warn!(error = %e, "persisted store image unusable, bootstrapping fresh");
                    Self::bootstrap(blobs.as_ref())?
                }
            },
            _ => Self::bootstrap(blobs.as_ref())?,
        };
        Ok(Self {
            engine,
            blobs,
            seq: 0,
        })
    }

    /// Fresh engine with the empty schema persisted immediately, so a new
    /// install survives a restart before any data is written.
    fn bootstrap(blobs: &dyn BlobStore) -> Result<Engine, MartError> {
        let engine = Engine::fresh()?;
        ensure_schema(&engine.conn)?;
        blobs.save(&engine.image()?)?;
        info!("embedded store bootstrapped with empty schema");
        Ok(engine)
    }

    /// Rows ordered by creation time descending; rowid breaks same-second
    /// ties so rapid inserts still come back newest-first.
    pub fn list_products(&self) -> Result<Vec<Product>, MartError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC, rowid DESC"
        );
        let mut stmt = self.engine.conn.prepare(&sql)?;
        let rows = stmt.query_map([], models::product_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Insert a locally listed item. The id is generated here and the
    /// creation timestamp by the engine; the stored row is read back so the
    /// caller sees exactly what a later `list_products` will return.
    pub fn create_product(&mut self, draft: &NewProduct) -> Result<Product, MartError> {
        let id = self.next_id("p");
        self.engine.conn.execute(
            "INSERT INTO products (id, seller_id, seller_name, title, description, price, category, condition, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                draft.seller_id,
                draft.seller_name,
                draft.title,
                draft.description,
                draft.price,
                draft.category.as_str(),
                draft.condition,
                draft.image,
            ],
        )?;
        self.write_through()?;

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = self
            .engine
            .conn
            .query_row(&sql, params![id], models::product_from_row)?;
        Ok(product)
    }

    /// Case-sensitive unique lookup by login handle.
    pub fn find_user(&self, handle: &str) -> Result<Option<User>, MartError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
        let user = self
            .engine
            .conn
            .query_row(&sql, params![handle], models::user_from_row)
            .optional()?;
        Ok(user)
    }

    /// Find-or-create by handle. A handle seen before returns the existing
    /// row unchanged; ids are immutable once assigned.
    pub fn authenticate(&mut self, handle: &str) -> Result<User, MartError> {
        if let Some(user) = self.find_user(handle)? {
            return Ok(user);
        }
        let user = User {
            id: self.next_id("u"),
            username: handle.to_string(),
            college: String::new(),
            avatar: format!("https://ui-avatars.com/api/?name={handle}"),
        };
        self.engine.conn.execute(
            "INSERT INTO users (id, username, college, avatar) VALUES (?1, ?2, ?3, ?4)",
            params![user.id, user.username, user.college, user.avatar],
        )?;
        self.write_through()?;
        info!(handle, id = %user.id, "registered local account");
        Ok(user)
    }

    /// Current full serialized engine state, for user-initiated backup.
    pub fn export(&self) -> Result<Vec<u8>, MartError> {
        self.engine.image()
    }

    /// Import hard reset: build a replacement engine from the supplied bytes,
    /// persist them, and swap the live handle. A corrupt import is an error
    /// and leaves the current engine untouched.
    pub fn reinitialize(&mut self, bytes: &[u8]) -> Result<(), MartError> {
        let engine = Engine::from_image(bytes)?;
        self.blobs.save(bytes)?;
        self.engine = engine;
        info!(bytes = bytes.len(), "store reinitialised from imported image");
        Ok(())
    }

    /// Byte length of the persisted image. Diagnostics only.
    pub fn persisted_size(&self) -> Result<u64, MartError> {
        self.blobs.size()
    }

    /// Collision-free within one store lifetime: millisecond timestamp plus a
    /// per-store sequence. Global uniqueness is not needed since local rows
    /// never merge with remote data.
    fn next_id(&mut self, kind: &str) -> String {
        self.seq += 1;
        format!("{kind}-{}-{}", Utc::now().timestamp_millis(), self.seq)
    }

    fn write_through(&self) -> Result<(), MartError> {
        self.blobs.save(&self.engine.image()?)
    }
}
