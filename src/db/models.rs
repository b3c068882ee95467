//! Typed decoders applied at the embedded-store boundary. Downstream code
//! only ever sees the fixed entity shapes from `types::market`.

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

use crate::types::market::{Category, Product, User};

/// Column order must match `store::PRODUCT_COLUMNS`.
pub fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    let raw_created: String = row.get(9)?;
    Ok(Product {
        id: row.get(0)?,
        seller_id: row.get(1)?,
        seller_name: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        price: row.get(5)?,
        category: Category::from(row.get::<_, String>(6)?),
        condition: row.get(7)?,
        image: row.get(8)?,
        created_at: parse_timestamp(9, &raw_created)?,
        likes: 0,
    })
}

pub fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        college: row.get(2)?,
        avatar: row.get(3)?,
    })
}

/// CURRENT_TIMESTAMP yields `YYYY-MM-DD HH:MM:SS`; imported images may carry
/// RFC 3339 instead. Both decode to UTC.
fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
