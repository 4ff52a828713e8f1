use std::fs;
use std::path::Path;

use crate::io::store_io::StoreIoError;
use crate::model::prefs::Prefs;

const PREFS_FILE: &str = "prefs.toml";

/// Read preferences from the data directory. A missing or malformed file
/// falls back to defaults.
pub fn load_prefs(data_dir: &Path) -> Prefs {
    let path = data_dir.join(PREFS_FILE);
    let Ok(content) = fs::read_to_string(&path) else {
        return Prefs::default();
    };
    toml::from_str(&content).unwrap_or_default()
}

/// Write preferences back to the data directory. Called on every
/// theme toggle; the file is tiny, so a plain rewrite is fine.
pub fn save_prefs(data_dir: &Path, prefs: &Prefs) -> Result<(), StoreIoError> {
    fs::create_dir_all(data_dir).map_err(|e| StoreIoError::WriteError {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    let path = data_dir.join(PREFS_FILE);
    let content = toml::to_string(prefs)?;
    fs::write(&path, content).map_err(|e| StoreIoError::WriteError {
        path,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::prefs::ThemeMode;
    use tempfile::TempDir;

    #[test]
    fn round_trip_preserves_theme() {
        let dir = TempDir::new().unwrap();
        let prefs = Prefs {
            theme: ThemeMode::Dark,
        };
        save_prefs(dir.path(), &prefs).unwrap();
        assert_eq!(load_prefs(dir.path()), prefs);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_prefs(dir.path()), Prefs::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PREFS_FILE), "theme = [broken").unwrap();
        assert_eq!(load_prefs(dir.path()), Prefs::default());
    }
}
