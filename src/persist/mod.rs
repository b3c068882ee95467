//! Durable byte-blob storage for the serialized store image.
//!
//! The adapter knows nothing about schema; it holds exactly one blob under a
//! fixed location and replaces it wholesale on every save. Import reuses
//! `save` for bulk replacement.

pub mod file;
pub mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::MartError;

pub trait BlobStore: Send + Sync {
    /// Overwrite the stored blob entirely. No incremental diffing.
    fn save(&self, blob: &[u8]) -> Result<(), MartError>;

    /// `None` means no blob has ever been saved; an empty-but-present blob is
    /// `Some(vec![])`, never conflated with absence.
    fn load(&self) -> Result<Option<Vec<u8>>, MartError>;

    /// Byte length of the currently stored blob (0 when absent). Diagnostics.
    fn size(&self) -> Result<u64, MartError>;
}
