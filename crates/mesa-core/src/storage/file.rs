//! Directory-backed backend: one JSON file per key.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CoreResult;

use super::Backend;

/// A backend storing each key as `<sanitized key>.json` in a directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Open (and create if needed) a storage directory.
    pub fn new(dir: impl AsRef<Path>) -> CoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn write(&self, key: &str, value: &str) -> CoreResult<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)?;
        fs::rename(&temp_path, &path)?;
        tracing::debug!("wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn delete(&self, key: &str) -> CoreResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("removed {}", path.display());
        }
        Ok(())
    }
}
