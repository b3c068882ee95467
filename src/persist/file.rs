use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::BlobStore;
use crate::error::MartError;

/// File-backed blob storage. Saves go through a sibling temp file and a
/// rename, so a crash mid-write leaves the previous image intact.
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileBlobStore {
    fn save(&self, blob: &[u8]) -> Result<(), MartError> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = match dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new_in(".")?,
        };
        tmp.write_all(blob)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Vec<u8>>, MartError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn size(&self) -> Result<u64, MartError> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_is_absent_before_first_save() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileBlobStore::new(dir.path().join("image.db"));
        assert!(store.load().expect("load").is_none());
        assert_eq!(store.size().expect("size"), 0);
    }

    #[test]
    fn save_overwrites_and_reports_size() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileBlobStore::new(dir.path().join("image.db"));

        store.save(b"first image").expect("save");
        assert_eq!(store.load().expect("load").as_deref(), Some(&b"first image"[..]));

        store.save(b"v2").expect("overwrite");
        assert_eq!(store.load().expect("load").as_deref(), Some(&b"v2"[..]));
        assert_eq!(store.size().expect("size"), 2);
    }

    #[test]
    fn empty_blob_is_present_not_absent() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = FileBlobStore::new(dir.path().join("image.db"));
        store.save(b"").expect("save empty");
        assert_eq!(store.load().expect("load"), Some(Vec::new()));
    }
}
