//! JSON file adapters for the session and metadata store ports.
//!
//! Layout:
//!
//! ```text
//! <sessions_dir>/<session_id>.json               [{"role": ..., "content": ...}, ...]
//! <metadata_dir>/<session_id>_metadata.json      {"display_name": ...}
//! ```
//!
//! Files are rewritten whole on every save; there is no locking and the
//! last writer wins.

mod json_metadata_store;
mod json_session_store;

pub use json_metadata_store::JsonMetadataStore;
pub use json_session_store::JsonSessionStore;

use diagchat_application::StoreError;
use serde::Serialize;
use std::path::Path;

/// Suffix of metadata files, which never count as sessions.
pub(crate) const METADATA_SUFFIX: &str = "_metadata.json";

/// Serialize `value` as pretty JSON and overwrite `path`, creating the
/// parent directory when needed.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    std::fs::write(path, body).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
