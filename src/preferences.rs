//! Learner preferences storage
//!
//! Handles saving and loading preferences to a JSON file in the user's
//! config directory. Tracing progress is never stored here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Learner preferences
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Ink color for traced strokes (None = default)
    pub stroke_color: Option<String>,
    /// Play recorded samples when available (None = true)
    pub prefer_samples: Option<bool>,
    /// Phoneme of the last lesson opened
    pub last_phoneme: Option<String>,
    /// When the last lesson was opened (RFC 3339 timestamp)
    pub last_opened_at: Option<String>,
}

impl Preferences {
    pub fn prefer_samples(&self) -> bool {
        self.prefer_samples.unwrap_or(true)
    }

    /// Remember `phoneme` as the last opened lesson
    pub fn record_opened(&mut self, phoneme: &str) {
        self.last_phoneme = Some(phoneme.to_string());
        self.last_opened_at = Some(chrono::Utc::now().to_rfc3339());
    }

    /// When the last lesson was opened, if the stored timestamp is valid
    pub fn last_opened(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        let raw = self.last_opened_at.as_deref()?;
        match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(timestamp) => Some(timestamp),
            Err(_) => {
                error!("Failed to parse last_opened_at timestamp");
                None
            }
        }
    }
}

/// Get the preferences file path
pub fn preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Phonics").join("preferences.json"))
}

/// Load preferences from `path`
///
/// Returns default preferences if the file doesn't exist or can't be read
pub fn load_preferences_from(path: &Path) -> Preferences {
    if !path.exists() {
        return Preferences::default();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(prefs) => prefs,
            Err(e) => {
                error!("Failed to parse preferences: {}", e);
                Preferences::default()
            }
        },
        Err(e) => {
            error!("Failed to read preferences file: {}", e);
            Preferences::default()
        }
    }
}

/// Load preferences from the default location
pub fn load_preferences() -> Preferences {
    match preferences_path() {
        Some(path) => load_preferences_from(&path),
        None => Preferences::default(),
    }
}

/// Save preferences to `path`, creating parent directories
pub fn save_preferences_to(path: &Path, prefs: &Preferences) -> Result<(), PreferencesError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
            info!("Created preferences directory: {:?}", parent);
        }
    }

    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json)?;
    info!("Saved preferences to: {:?}", path);

    Ok(())
}

/// Save preferences to the default location
pub fn save_preferences(prefs: &Preferences) -> Result<(), PreferencesError> {
    let path = preferences_path().ok_or(PreferencesError::NoConfigDir)?;
    save_preferences_to(&path, prefs)
}

/// Preferences errors
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Could not find config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("phonics-prefs-{}-{}", std::process::id(), name))
            .join("preferences.json")
    }

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert!(prefs.stroke_color.is_none());
        assert!(prefs.last_phoneme.is_none());
        assert!(prefs.prefer_samples());
        assert!(prefs.last_opened().is_none());
    }

    #[test]
    fn test_record_opened_sets_timestamp() {
        let mut prefs = Preferences::default();
        prefs.record_opened("SH");
        assert_eq!(prefs.last_phoneme.as_deref(), Some("SH"));
        assert!(prefs.last_opened().is_some());
    }

    #[test]
    fn test_invalid_timestamp_is_ignored() {
        let prefs = Preferences {
            last_opened_at: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(prefs.last_opened().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = scratch_path("roundtrip");
        let prefs = Preferences {
            stroke_color: Some("#FF0000".to_string()),
            prefer_samples: Some(false),
            last_phoneme: Some("OO LONG".to_string()),
            last_opened_at: None,
        };
        save_preferences_to(&path, &prefs).expect("save should succeed");
        assert_eq!(load_preferences_from(&path), prefs);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let path = scratch_path("corrupt");
        assert_eq!(load_preferences_from(&path), Preferences::default());

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load_preferences_from(&path), Preferences::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_preferences_path() {
        if let Some(path) = preferences_path() {
            assert!(path.ends_with("Phonics/preferences.json"));
        }
    }
}
