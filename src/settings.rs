//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{LayoutConfig, WorkWeek};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub work_week: WorkWeek,
    pub layout: LayoutConfig,
    /// Plan reopened on startup.
    pub last_file: Option<PathBuf>,
}

impl AppSettings {
    /// Default settings file location, or `./settings.json` when the OS has
    /// no config directory.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "training-gantt")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    /// Read settings, falling back to defaults when the file is missing or
    /// unreadable. Out-of-range layout constants are clamped.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str::<Self>(&contents) {
            Ok(mut settings) => {
                let layout = settings.layout.sanitized();
                if layout != settings.layout {
                    log::warn!(
                        "Corrected layout settings in {:?}: {:?} -> {:?}",
                        path,
                        settings.layout,
                        layout
                    );
                    settings.layout = layout;
                }
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}
