//! fintrack-storage-json
//!
//! JSON snapshots of per-user records, one file per user. Used as a local
//! stand-in for the hosted document store by the CLI and tests.

use std::{
    fs::{self, File},
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use fintrack_core::{storage::RecordSource, CoreError};
use fintrack_domain::UserRecords;

const RECORD_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = ".tmp";

/// Filesystem-backed record snapshots rooted in a single directory.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    root: PathBuf,
}

impl JsonRecordStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn records_path(&self, user_id: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", encode_user_id(user_id), RECORD_EXTENSION))
    }

    pub fn save_records(&self, records: &UserRecords) -> Result<PathBuf, CoreError> {
        if records.user_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "records must carry a user id to be stored".into(),
            ));
        }
        let path = self.records_path(&records.user_id);
        save_records_to_path(records, &path)?;
        tracing::debug!(user = %records.user_id, path = %path.display(), "records saved");
        Ok(path)
    }

    pub fn delete_records(&self, user_id: &str) -> Result<bool, CoreError> {
        let path = self.records_path(user_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

impl RecordSource for JsonRecordStore {
    fn load_records(&self, user_id: &str) -> Result<UserRecords, CoreError> {
        let path = self.records_path(user_id);
        if !path.exists() {
            return Err(CoreError::RecordsNotFound(user_id.to_string()));
        }
        let mut records = load_records_from_path(&path)?;
        if records.user_id.is_empty() {
            records.user_id = user_id.to_string();
        }
        Ok(records)
    }

    fn list_users(&self) -> Result<Vec<String>, CoreError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut users = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            match path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(decode_user_id)
            {
                Some(user) => users.push(user),
                None => tracing::debug!(path = %path.display(), "ignoring foreign snapshot name"),
            }
        }
        users.sort();
        Ok(users)
    }
}

/// Saves a records snapshot to an arbitrary path on disk.
/// Staged in `<path>.tmp` and renamed into place.
pub fn save_records_to_path(records: &UserRecords, path: &Path) -> Result<(), CoreError> {
    let json =
        serde_json::to_vec_pretty(records).map_err(|err| CoreError::Serde(err.to_string()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut staged = path.as_os_str().to_owned();
    staged.push(TMP_SUFFIX);
    let staged = PathBuf::from(staged);

    let mut file = File::create(&staged)?;
    file.write_all(&json)?;
    file.sync_all()?;
    drop(file);
    fs::rename(&staged, path)?;
    Ok(())
}

/// Loads a records snapshot from the provided filesystem path.
pub fn load_records_from_path(path: &Path) -> Result<UserRecords, CoreError> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|err| CoreError::Serde(err.to_string()))
}

/// File stem for a user id.
///
/// Lowercase ASCII letters, digits and `-` are kept; every other byte,
/// uppercase letters included, becomes `_XX` (hex). Ids that differ only in
/// case therefore never share a file, even on case-insensitive filesystems.
fn encode_user_id(user_id: &str) -> String {
    let mut encoded = String::with_capacity(user_id.len());
    for byte in user_id.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => encoded.push(char::from(byte)),
            other => encoded.push_str(&format!("_{other:02X}")),
        }
    }
    encoded
}

/// Inverse of [`encode_user_id`]; `None` for stems it could not have produced.
fn decode_user_id(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'-' => {
                bytes.push(byte);
                rest = tail;
            }
            b'_' => {
                let hex = tail.get(..2)?;
                if !hex.iter().all(|b| matches!(b, b'0'..=b'9' | b'A'..=b'F')) {
                    return None;
                }
                let hex = std::str::from_utf8(hex).ok()?;
                let decoded = u8::from_str_radix(hex, 16).ok()?;
                if matches!(decoded, b'a'..=b'z' | b'0'..=b'9' | b'-') {
                    return None;
                }
                bytes.push(decoded);
                rest = &tail[2..];
            }
            _ => return None,
        }
    }
    String::from_utf8(bytes).ok()
}
