//! Configuration module for sougou-search
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load settings from an explicit path, the environment, or the default
/// locations, then apply `SOUGOU_*` overrides.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match find_settings_file(explicit) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            debug!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    Ok(settings)
}

fn find_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    // An explicit path is used as-is so a typo surfaces as a read error
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("SOUGOU_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let candidates = [
        Some(PathBuf::from("settings.yml")),
        dirs::config_dir().map(|p| p.join("sougou-search/settings.yml")),
    ];

    candidates.into_iter().flatten().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "defaults:\n  max_results: 5\n  timeout: 3.5").unwrap();

        let settings = load(Some(file.path())).unwrap();
        assert_eq!(settings.defaults.max_results, 5);
        assert_eq!(settings.defaults.timeout, 3.5);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load(Some(&dir.path().join("nope.yml")));
        assert!(result.is_err());
    }
}
