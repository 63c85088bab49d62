//! Session histories as one JSON array file per session.

use super::{METADATA_SUFFIX, write_json};
use diagchat_application::{SessionStore, StoreError};
use diagchat_domain::{Message, SessionId};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// [`SessionStore`] backed by `<dir>/<session_id>.json` files.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    dir: PathBuf,
}

impl JsonSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the history file for `id`.
    pub fn path_for(&self, id: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Session identifier encoded in a directory entry name, if any.
    fn id_from_file_name(name: &str) -> Option<SessionId> {
        if name.ends_with(METADATA_SUFFIX) {
            return None;
        }
        let stem = name.strip_suffix(".json")?;
        match SessionId::new(stem) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!("Skipping {}: {}", name, e);
                None
            }
        }
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self, id: &SessionId) -> Result<Vec<Message>, StoreError> {
        let path = self.path_for(id);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_str(&raw).map_err(|e| {
            warn!("Session history {} is corrupt: {}", path.display(), e);
            StoreError::Corrupt {
                path,
                reason: e.to_string(),
            }
        })
    }

    fn save(&self, id: &SessionId, history: &[Message]) -> Result<(), StoreError> {
        let path = self.path_for(id);
        write_json(&path, history)?;
        debug!(
            session = %id,
            messages = history.len(),
            "Saved history to {}",
            path.display()
        );
        Ok(())
    }

    fn clear(&self, id: &SessionId) -> Result<(), StoreError> {
        let path = self.path_for(id);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(session = %id, "Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn exists(&self, id: &SessionId) -> bool {
        self.path_for(id).is_file()
    }

    fn list(&self) -> Result<Vec<SessionId>, StoreError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(Self::id_from_file_name)
            {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonSessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSessionStore::new(dir.path().join("session_logs"));
        (dir, store)
    }

    fn id(raw: &str) -> SessionId {
        SessionId::new(raw).unwrap()
    }

    fn sample_history() -> Vec<Message> {
        vec![
            Message::user("check engine light"),
            Message::assistant("Try scanning codes."),
        ]
    }

    #[test]
    fn test_load_missing_is_empty() {
        let (_dir, store) = store();
        assert!(store.load(&id("abc123")).unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let (_dir, store) = store();
        let history = vec![
            Message::user("check engine light"),
            Message::assistant("Try scanning codes."),
            Message::user("what does P0300 mean? «ünïcödé»"),
            Message::assistant("Random misfire.\nCheck plugs and coils."),
        ];

        store.save(&id("abc123"), &history).unwrap();

        assert_eq!(store.load(&id("abc123")).unwrap(), history);
    }

    #[test]
    fn test_save_creates_directory_and_writes_json_array() {
        let (_dir, store) = store();
        assert!(!store.dir().exists());

        store.save(&id("abc123"), &sample_history()).unwrap();

        let raw = std::fs::read_to_string(store.path_for(&id("abc123"))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"role": "user", "content": "check engine light"},
                {"role": "assistant", "content": "Try scanning codes."}
            ])
        );
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let (_dir, store) = store();
        store.save(&id("abc123"), &sample_history()).unwrap();
        store
            .save(&id("abc123"), &[Message::user("only this")])
            .unwrap();

        assert_eq!(
            store.load(&id("abc123")).unwrap(),
            vec![Message::user("only this")]
        );
    }

    #[test]
    fn test_clear_then_load_is_empty_and_idempotent() {
        let (_dir, store) = store();
        store.save(&id("abc123"), &sample_history()).unwrap();

        store.clear(&id("abc123")).unwrap();
        assert!(store.load(&id("abc123")).unwrap().is_empty());
        assert!(!store.exists(&id("abc123")));

        store.clear(&id("abc123")).unwrap();
        store.clear(&id("neverwas")).unwrap();
    }

    #[test]
    fn test_corrupt_history_is_reported() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.path_for(&id("abc123")), "{not json").unwrap();

        let err = store.load(&id("abc123")).unwrap_err();
        assert!(err.is_corrupt());
        assert!(err.to_string().contains("abc123.json"));
    }

    #[test]
    fn test_list_filters_reserved_and_metadata_files() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        for name in [
            "abc123.json",
            "0a1b2c3d.json",
            "abc123_metadata.json",
            ".json",
            "null.json",
            "[].json",
            "notes.txt",
        ] {
            std::fs::write(store.dir().join(name), "[]").unwrap();
        }
        std::fs::create_dir_all(store.dir().join("nested.json")).unwrap();

        let ids = store.list().unwrap();

        assert_eq!(ids, vec![id("0a1b2c3d"), id("abc123")]);
        for id in &ids {
            assert!(!["", "null", "[]"].contains(&id.as_str()));
        }
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
    }
}
