//! The current scenario image and the asset manifest listing choices.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::storage::{Storage, keys};

/// Image shown before the GM picks a scenario.
pub const DEFAULT_SCENARIO: &str = "assets/placeholder.svg";
/// Well-known location of the asset manifest.
pub const MANIFEST_PATH: &str = "assets/manifest.json";

/// An image listed in the asset manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetImage {
    /// Display name.
    pub name: String,
    /// Path relative to the asset root.
    pub path: String,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    images: Vec<AssetImage>,
}

/// Read the manifest's image list. Any failure yields an empty list.
pub fn load_manifest(path: &Path) -> Vec<AssetImage> {
    let parsed = std::fs::read_to_string(path)
        .map_err(CoreError::from)
        .and_then(|json| serde_json::from_str::<Manifest>(&json).map_err(CoreError::from));
    match parsed {
        Ok(manifest) => manifest.images,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not load asset manifest");
            Vec::new()
        }
    }
}

/// The persisted scenario reference.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    storage: Storage,
}

impl ScenarioStore {
    /// Create a store over shared storage.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// The current scenario image, or the placeholder.
    pub fn current(&self) -> String {
        self.storage
            .get(keys::SCENARIO, DEFAULT_SCENARIO.to_string())
    }

    /// Replace the scenario image. Blank paths are rejected.
    pub fn set(&self, path: &str) -> CoreResult<()> {
        let path = path.trim();
        if path.is_empty() {
            return Err(CoreError::invalid("scenario path is empty"));
        }
        self.storage.set(keys::SCENARIO, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_placeholder() {
        let store = ScenarioStore::new(Storage::in_memory());
        assert_eq!(store.current(), DEFAULT_SCENARIO);
        store.set("assets/cave.png").unwrap();
        assert_eq!(store.current(), "assets/cave.png");
        assert!(store.set(" ").is_err());
    }

    #[test]
    fn manifest_loads_images() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("manifest.json");
        std::fs::write(
            &path,
            r#"{"images":[{"name":"Cave","path":"assets/cave.png"}]}"#,
        )
        .unwrap();
        let images = load_manifest(&path);
        assert_eq!(
            images,
            vec![AssetImage {
                name: "Cave".to_string(),
                path: "assets/cave.png".to_string()
            }]
        );
    }

    #[test]
    fn manifest_failures_are_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_manifest(&tmp.path().join("missing.json")).is_empty());
        let bad = tmp.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert!(load_manifest(&bad).is_empty());
    }
}
