//! File-backed artifact store.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::debug;

use super::{SummaryArtifact, SummaryArtifactStore};
use crate::errors::{Error, Result};

/// Persists the latest artifact as one file under the data directory,
/// overwritten on every sync.
pub struct FileArtifactStore {
    path: PathBuf,
}

impl FileArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn content_type(&self) -> &'static str {
        match self.path.extension().and_then(|e| e.to_str()) {
            Some("svg") => "image/svg+xml",
            Some("png") => "image/png",
            _ => "application/octet-stream",
        }
    }
}

impl SummaryArtifactStore for FileArtifactStore {
    fn save(&self, artifact: &SummaryArtifact) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| Error::Artifact(e.to_string()))?;
        }
        fs::write(&self.path, &artifact.bytes).map_err(|e| Error::Artifact(e.to_string()))?;
        debug!("summary artifact written to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<SummaryArtifact>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(SummaryArtifact {
                bytes,
                content_type: self.content_type(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Artifact(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_before_any_save_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path().join("summary.svg"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileArtifactStore::new(dir.path().join("nested").join("summary.svg"));

        let artifact = SummaryArtifact {
            bytes: b"<svg/>".to_vec(),
            content_type: "image/svg+xml",
        };
        store.save(&artifact).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.bytes, b"<svg/>");
        assert_eq!(loaded.content_type, "image/svg+xml");
    }
}
