//! Record store: keyed-by-user, append-only
//!
//! Records are created once on submission and never updated or deleted; the
//! reporter reads them in bulk per user. Ordering is not a store guarantee,
//! the engine sorts. Two backends: a JSON-lines flat file and an in-memory
//! map for tests and ephemeral serving.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{EmailPreference, ReflectionRecord};

/// Identifier returned for an appended record
pub type RecordId = String;

/// Storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt record at line {line}: {source}")]
    Corrupt {
        line: usize,
        source: serde_json::Error,
    },

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Contract the engine and route layer depend on
pub trait RecordStore {
    /// Append one record; returns its id
    fn append_record(&mut self, record: &ReflectionRecord) -> Result<RecordId, StoreError>;

    /// All records for one user, order not guaranteed
    fn get_records(&self, user_id: &str) -> Result<Vec<ReflectionRecord>, StoreError>;

    /// True when the user has at least one record
    fn user_exists(&self, user_id: &str) -> Result<bool, StoreError> {
        Ok(!self.get_records(user_id)?.is_empty())
    }

    /// Upsert the user's email preference
    fn set_email_preference(&mut self, pref: &EmailPreference) -> Result<(), StoreError>;

    /// Look up the user's email preference
    fn get_email_preference(&self, user_id: &str) -> Result<Option<EmailPreference>, StoreError>;
}

/// Generate a record id from the wall clock
fn generate_record_id() -> RecordId {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("rec_{:x}", nanos as u64)
}

// =============================================================================
// JSONL FLAT FILE
// =============================================================================

/// Append-only JSON-lines file, one record per line.
///
/// Email preferences live in a sibling JSON file keyed by userId.
#[derive(Debug)]
pub struct JsonlStore {
    data_path: PathBuf,
    prefs_path: PathBuf,
}

impl JsonlStore {
    /// Open a store backed by the given data file (created on first append)
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        let data_path = data_path.into();
        let prefs_path = data_path.with_extension("prefs.json");
        Self {
            data_path,
            prefs_path,
        }
    }

    /// Read and parse every line of the data file; missing file = no records
    fn read_all(&self) -> Result<Vec<ReflectionRecord>, StoreError> {
        let content = match std::fs::read_to_string(&self.data_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: ReflectionRecord = serde_json::from_str(line)
                .map_err(|source| StoreError::Corrupt { line: i + 1, source })?;
            records.push(record);
        }
        Ok(records)
    }

    fn read_prefs(&self) -> Result<HashMap<String, EmailPreference>, StoreError> {
        match std::fs::read_to_string(&self.prefs_path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_prefs(&self, prefs: &HashMap<String, EmailPreference>) -> Result<(), StoreError> {
        if let Some(dir) = self.prefs_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.prefs_path, json)?;
        Ok(())
    }

    /// Path to the backing data file
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

impl RecordStore for JsonlStore {
    fn append_record(&mut self, record: &ReflectionRecord) -> Result<RecordId, StoreError> {
        if let Some(dir) = self.data_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let line = serde_json::to_string(record)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.data_path)?;
        writeln!(file, "{}", line)?;

        Ok(generate_record_id())
    }

    fn get_records(&self, user_id: &str) -> Result<Vec<ReflectionRecord>, StoreError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect())
    }

    fn set_email_preference(&mut self, pref: &EmailPreference) -> Result<(), StoreError> {
        let mut prefs = self.read_prefs()?;
        prefs.insert(pref.user_id.clone(), pref.clone());
        self.write_prefs(&prefs)
    }

    fn get_email_preference(&self, user_id: &str) -> Result<Option<EmailPreference>, StoreError> {
        Ok(self.read_prefs()?.get(user_id).cloned())
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// In-process store; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<ReflectionRecord>>,
    prefs: HashMap<String, EmailPreference>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn append_record(&mut self, record: &ReflectionRecord) -> Result<RecordId, StoreError> {
        self.records
            .entry(record.user_id.clone())
            .or_default()
            .push(record.clone());
        Ok(generate_record_id())
    }

    fn get_records(&self, user_id: &str) -> Result<Vec<ReflectionRecord>, StoreError> {
        Ok(self.records.get(user_id).cloned().unwrap_or_default())
    }

    fn set_email_preference(&mut self, pref: &EmailPreference) -> Result<(), StoreError> {
        self.prefs.insert(pref.user_id.clone(), pref.clone());
        Ok(())
    }

    fn get_email_preference(&self, user_id: &str) -> Result<Option<EmailPreference>, StoreError> {
        Ok(self.prefs.get(user_id).cloned())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(user: &str, day: u8) -> ReflectionRecord {
        ReflectionRecord::new(user, format!("2024-03-{:02} 08:00:00", day), 60.0, 40.0)
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(!store.user_exists("u1").unwrap());

        store.append_record(&rec("u1", 1)).unwrap();
        store.append_record(&rec("u1", 2)).unwrap();
        store.append_record(&rec("u2", 1)).unwrap();

        assert_eq!(store.get_records("u1").unwrap().len(), 2);
        assert_eq!(store.get_records("u2").unwrap().len(), 1);
        assert!(store.get_records("nobody").unwrap().is_empty());
        assert!(store.user_exists("u1").unwrap());
    }

    #[test]
    fn test_memory_store_preference_upsert() {
        let mut store = MemoryStore::new();
        assert!(store.get_email_preference("u1").unwrap().is_none());

        store
            .set_email_preference(&EmailPreference {
                user_id: "u1".to_string(),
                wants_reminders: true,
                user_email: Some("u1@example.com".to_string()),
                reminder_time: Some("09:00".to_string()),
            })
            .unwrap();

        store
            .set_email_preference(&EmailPreference {
                user_id: "u1".to_string(),
                wants_reminders: false,
                user_email: Some("u1@example.com".to_string()),
                reminder_time: None,
            })
            .unwrap();

        let pref = store.get_email_preference("u1").unwrap().unwrap();
        assert!(!pref.wants_reminders);
        assert_eq!(pref.reminder_time, None);
    }

    #[test]
    fn test_jsonl_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonlStore::new(dir.path().join("user_data.jsonl"));

        // Missing file reads as empty, not an error
        assert!(store.get_records("u1").unwrap().is_empty());

        store.append_record(&rec("u1", 1)).unwrap();
        store.append_record(&rec("u2", 1)).unwrap();
        store.append_record(&rec("u1", 2)).unwrap();

        let records = store.get_records("u1").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.user_id == "u1"));
    }

    #[test]
    fn test_jsonl_store_corrupt_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();

        let store = JsonlStore::new(&path);
        let err = store.get_records("u1").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { line: 1, .. }));
    }

    #[test]
    fn test_jsonl_store_preferences_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_data.jsonl");

        {
            let mut store = JsonlStore::new(&path);
            store
                .set_email_preference(&EmailPreference {
                    user_id: "u1".to_string(),
                    wants_reminders: true,
                    user_email: None,
                    reminder_time: Some("08:30".to_string()),
                })
                .unwrap();
        }

        // Fresh handle sees the same preference
        let store = JsonlStore::new(&path);
        let pref = store.get_email_preference("u1").unwrap().unwrap();
        assert!(pref.wants_reminders);
        assert_eq!(pref.reminder_time.as_deref(), Some("08:30"));
    }
}
