//! Display names as one small JSON object file per session.

use super::{METADATA_SUFFIX, write_json};
use diagchat_application::{MetadataStore, StoreError};
use diagchat_domain::{MetadataLookup, SessionId, SessionMetadata};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk shape; `display_name` may be missing in hand-edited files.
#[derive(Deserialize)]
struct RawMetadata {
    display_name: Option<String>,
}

/// [`MetadataStore`] backed by `<dir>/<session_id>_metadata.json` files.
#[derive(Debug, Clone)]
pub struct JsonMetadataStore {
    dir: PathBuf,
}

impl JsonMetadataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &SessionId) -> PathBuf {
        self.dir.join(format!("{}{}", id, METADATA_SUFFIX))
    }
}

impl MetadataStore for JsonMetadataStore {
    fn lookup(&self, id: &SessionId) -> MetadataLookup {
        let path = self.path_for(id);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return MetadataLookup::Absent,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return MetadataLookup::Malformed(e.to_string());
            }
        };

        match serde_json::from_str::<RawMetadata>(&raw) {
            Ok(RawMetadata {
                display_name: Some(name),
            }) => MetadataLookup::Present(SessionMetadata { display_name: name }),
            Ok(RawMetadata { display_name: None }) => {
                debug!("{} has no display_name", path.display());
                MetadataLookup::Absent
            }
            Err(e) => {
                warn!("Ignoring malformed metadata {}: {}", path.display(), e);
                MetadataLookup::Malformed(e.to_string())
            }
        }
    }

    fn store(&self, id: &SessionId, metadata: &SessionMetadata) -> Result<(), StoreError> {
        let path = self.path_for(id);
        write_json(&path, metadata)?;
        debug!(session = %id, "Saved metadata to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonMetadataStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonMetadataStore::new(dir.path().join("chat_metadata"));
        (dir, store)
    }

    fn abc123() -> SessionId {
        SessionId::new("abc123").unwrap()
    }

    #[test]
    fn test_display_name_defaults_to_id() {
        let (_dir, store) = store();
        assert_eq!(store.lookup(&abc123()), MetadataLookup::Absent);
        assert_eq!(store.display_name(&abc123()), "abc123");
    }

    #[test]
    fn test_set_display_name_trims_and_persists() {
        let (_dir, store) = store();

        store.set_display_name(&abc123(), "  Brake Issue  ").unwrap();

        assert_eq!(store.display_name(&abc123()), "Brake Issue");
        let raw = std::fs::read_to_string(store.path_for(&abc123())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"display_name": "Brake Issue"}));
        assert!(store.path_for(&abc123()).ends_with("abc123_metadata.json"));
    }

    #[test]
    fn test_set_display_name_overwrites() {
        let (_dir, store) = store();
        store.set_display_name(&abc123(), "First").unwrap();
        store.set_display_name(&abc123(), "Second").unwrap();
        assert_eq!(store.display_name(&abc123()), "Second");
    }

    #[test]
    fn test_blank_name_rejected() {
        let (_dir, store) = store();
        let err = store.set_display_name(&abc123(), "   ").unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(store.lookup(&abc123()), MetadataLookup::Absent);
    }

    #[test]
    fn test_malformed_file_falls_back_to_id() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.path_for(&abc123()), "{\"display_name\": ").unwrap();

        assert!(matches!(
            store.lookup(&abc123()),
            MetadataLookup::Malformed(_)
        ));
        assert_eq!(store.display_name(&abc123()), "abc123");
    }

    #[test]
    fn test_missing_field_is_absent() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.path_for(&abc123()), "{\"color\": \"red\"}").unwrap();

        assert_eq!(store.lookup(&abc123()), MetadataLookup::Absent);
    }

    #[test]
    fn test_unicode_name_preserved() {
        let (_dir, store) = store();
        store.set_display_name(&abc123(), "Bremsen – quietschen").unwrap();
        assert_eq!(store.display_name(&abc123()), "Bremsen – quietschen");
    }
}
