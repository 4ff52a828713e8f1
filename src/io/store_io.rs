use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;

use crate::model::task::Task;

const TASKS_FILE: &str = "tasks.json";

/// Error type for persistence operations
#[derive(Debug, thiserror::Error)]
pub enum StoreIoError {
    #[error("no usable data directory on this platform")]
    NoDataDir,
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not serialize task collection: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("could not serialize preferences: {0}")]
    PrefsSerializeError(#[from] toml::ser::Error),
}

/// Resolve the data directory: an explicit override wins, otherwise the
/// platform-native data dir.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, StoreIoError> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    ProjectDirs::from("", "", "nest")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreIoError::NoDataDir)
}

/// Load the task collection from the data directory. Absence or a parse
/// failure yields an empty collection; neither is fatal.
pub fn load_tasks(data_dir: &Path) -> Vec<Task> {
    let path = data_dir.join(TASKS_FILE);
    let Ok(content) = fs::read_to_string(&path) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Save the whole task collection, atomically (temp file + rename).
pub fn save_tasks(data_dir: &Path, tasks: &[Task]) -> Result<(), StoreIoError> {
    fs::create_dir_all(data_dir).map_err(|e| StoreIoError::WriteError {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    let path = data_dir.join(TASKS_FILE);
    let content = serde_json::to_string_pretty(tasks)?;
    atomic_write(&path, content.as_bytes()).map_err(|e| StoreIoError::WriteError {
        path,
        source: e,
    })
}

/// Write `content` to `path` atomically using a temp file + rename.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
