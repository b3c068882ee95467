use std::sync::Mutex;

use super::BlobStore;
use crate::error::MartError;

/// In-memory blob slot. Used by tests and ephemeral setups where durability
/// across restarts is not wanted.
#[derive(Default)]
pub struct MemoryBlobStore {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preloaded(blob: Vec<u8>) -> Self {
        Self {
            slot: Mutex::new(Some(blob)),
        }
    }
}

impl BlobStore for MemoryBlobStore {
    fn save(&self, blob: &[u8]) -> Result<(), MartError> {
        *self.slot.lock().expect("blob slot poisoned") = Some(blob.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, MartError> {
        Ok(self.slot.lock().expect("blob slot poisoned").clone())
    }

    fn size(&self) -> Result<u64, MartError> {
        Ok(self
            .slot
            .lock()
            .expect("blob slot poisoned")
            .as_ref()
            .map_or(0, |b| b.len() as u64))
    }
}
