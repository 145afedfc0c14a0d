//! Whole-file JSON tables.
//!
//! Writes go to a uniquely named temp file that is renamed over the target, so a
//! crash never leaves a half-written table. Concurrent writers are not
//! coordinated: the last rename wins.

use crate::{Result as StoreErrorResult, StoreError};

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Read and parse `path`, or `None` when the file does not exist.
pub(crate) async fn read<T: DeserializeOwned>(path: &Path) -> StoreErrorResult<Option<T>> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if contents.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| StoreError::json(path, e))
}

/// Serialize `value` as pretty JSON and replace `path` with it.
pub(crate) async fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreErrorResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    tokio::fs::create_dir_all(&parent)
        .await
        .map_err(|e| StoreError::io(&parent, e))?;

    let mut contents = serde_json::to_string_pretty(value).map_err(|e| StoreError::json(path, e))?;
    contents.push('\n');

    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || replace_file(&parent, &target, contents.as_bytes()))
        .await
        .map_err(|e| StoreError::io(path, std::io::Error::other(e)))?
}

/// Each writer gets its own uniquely named temp file in `parent`.
fn replace_file(parent: &Path, target: &Path, contents: &[u8]) -> StoreErrorResult<()> {
    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(target)
        .map(|_| ())
        .map_err(|e| StoreError::io(target, e.error))
}
