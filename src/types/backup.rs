use chrono::{DateTime, Utc};

/// A user-initiated export of the full store image, ready to be written out
/// as a standalone file.
#[derive(Debug, Clone)]
pub struct BackupFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl BackupFile {
    pub fn new(bytes: Vec<u8>, at: DateTime<Utc>) -> Self {
        Self {
            file_name: format!("unimart-backup-{}.db", at.format("%Y%m%d-%H%M%S")),
            bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn backup_name_carries_product_and_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let backup = BackupFile::new(vec![1, 2, 3], at);
        assert_eq!(backup.file_name, "unimart-backup-20260314-092653.db");
        assert_eq!(backup.bytes, vec![1, 2, 3]);
    }
}
