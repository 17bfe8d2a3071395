use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Persistence failure: fatal to the run, surfaced with the target path.
/// Never retried; the operator re-runs onboarding.
#[derive(Debug, thiserror::Error)]
#[error("failed to persist configuration to '{path}'")]
pub struct StorageError {
    pub path: PathBuf,
    #[source]
    pub source: anyhow::Error,
}

impl StorageError {
    fn new(path: &Path, source: impl Into<anyhow::Error>) -> Self {
        Self {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// Persist the full configuration document atomically.
///
/// The document is serialized to pretty JSON, written to a temp file in the
/// target directory, and renamed into place, so a crash mid-write leaves
/// the previous document untouched.
pub fn write_config(path: &Path, config: &Config) -> Result<(), StorageError> {
    let value = serde_json::to_value(config).map_err(|e| StorageError::new(path, e))?;
    let content =
        crate::config::render_config_json(&value).map_err(|e| StorageError::new(path, e))?;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir).map_err(|e| StorageError::new(path, e))?;
    }

    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
        .map_err(|e| StorageError::new(path, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| StorageError::new(path, e))?;
    tmp.write_all(b"\n")
        .map_err(|e| StorageError::new(path, e))?;
    tmp.persist(path)
        .map_err(|e| StorageError::new(path, e.error))?;

    Ok(())
}
