pub mod backup;
pub mod market;

pub use backup::BackupFile;
pub use market::{Category, NewProduct, Product, User};
