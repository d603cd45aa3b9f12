//! User settings persisted in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::store::DEFAULT_KEY;
use crate::model::stats::DEFAULT_UPCOMING_WINDOW_DAYS;

const APP_DIR_NAME: &str = "ProjectDashboard";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where project data lives. `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub upcoming_window_days: i64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            storage_key: DEFAULT_KEY.to_string(),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            window_width: 1280.0,
            window_height: 760.0,
        }
    }
}

impl Settings {
    /// Load settings from the config directory, writing defaults on first run.
    pub fn load_or_init() -> Self {
        let path = settings_path();
        if !path.exists() {
            let settings = Self::default();
            settings.save(&path);
            return settings;
        }
        Self::load_from(&path)
    }

    /// Read settings from `path`, falling back to defaults on any problem.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read settings, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "malformed settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "could not encode settings");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(path, json) {
            tracing::warn!(path = %path.display(), error = %e, "could not write settings");
        }
    }

    /// Directory that holds the project store.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_DIR_NAME)
}

pub fn settings_path() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.config_dir().join("settings.json"),
        None => PathBuf::from(".").join("settings.json"),
    }
}

pub fn default_data_dir() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().to_path_buf(),
        None => PathBuf::from(".").join("data"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "upcoming_window_days": 14 }"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.upcoming_window_days, 14);
        assert_eq!(settings.storage_key, "projects");
        assert!(settings.data_dir.is_none());
    }

    #[test]
    fn malformed_or_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        assert_eq!(Settings::load_from(&path), Settings::default());

        std::fs::write(&path, "[1, 2").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("settings.json");
        let settings = Settings {
            data_dir: Some(dir.path().join("data")),
            ..Settings::default()
        };
        settings.save(&path);
        assert_eq!(Settings::load_from(&path), settings);
        assert_eq!(settings.resolved_data_dir(), dir.path().join("data"));
    }
}
