//! User settings: vocabulary location, sheet schemes and dictation defaults.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DictationError, Result};
use crate::scheme::Scheme;
use crate::types::{MatchingMode, TargetFilter};

/// Narration preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrationSettings {
    pub enabled: bool,
    /// Language code passed to the speech synthesiser.
    pub language: String,
}

impl Default for NarrationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "de".to_string(),
        }
    }
}

/// Settings shared by every dictation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_path: Option<PathBuf>,
    pub schemes: BTreeMap<String, Scheme>,
    pub matching: MatchingMode,
    pub narration: NarrationSettings,
    pub shuffle: bool,
    pub target: TargetFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vocabulary_path: None,
            schemes: BTreeMap::new(),
            matching: MatchingMode::default(),
            narration: NarrationSettings::default(),
            shuffle: true,
            target: TargetFilter::default(),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                tracing::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(DictationError::SettingsIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Write settings to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| DictationError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }

    pub fn scheme(&self, name: &str) -> Result<&Scheme> {
        self.schemes.get(name).ok_or_else(|| DictationError::UnknownScheme {
            name: name.to_string(),
        })
    }

    pub fn add_scheme(&mut self, name: impl Into<String>, scheme: Scheme) -> Result<()> {
        let name = name.into();
        if self.schemes.contains_key(&name) {
            return Err(DictationError::SchemeExists { name });
        }
        self.schemes.insert(name, scheme);
        Ok(())
    }

    pub fn remove_scheme(&mut self, name: &str) -> bool {
        self.schemes.remove(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::TestBlock;
    use crate::status::StatusName;
    use pretty_assertions::assert_eq;

    fn verbs() -> Scheme {
        Scheme::new("verbs", 2, 3, vec![TestBlock::new("Type the infinitive", 0, 1)]).unwrap()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.shuffle);
        assert_eq!(settings.target, TargetFilter::Status(StatusName::New));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.vocabulary_path = Some(PathBuf::from("/home/me/vocabulary"));
        settings.matching = MatchingMode::IgnoreCase;
        settings.add_scheme("verbs", verbs()).unwrap();
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"shuffle": false}"#).unwrap();
        assert!(!settings.shuffle);
        assert!(settings.narration.enabled);
        assert!(settings.schemes.is_empty());
    }

    #[test]
    fn invalid_scheme_in_file_is_rejected() {
        let json = r#"{"schemes":{"verbs":{"sheet_name":"verbs","translation":0,"status":0,"test_blocks":[{"instructions":"x","spelling":1,"info":2}]}}}"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }

    #[test]
    fn scheme_names_are_unique() {
        let mut settings = Settings::default();
        settings.add_scheme("verbs", verbs()).unwrap();
        let err = settings.add_scheme("verbs", verbs()).unwrap_err();
        assert!(matches!(err, DictationError::SchemeExists { .. }));

        assert!(settings.scheme("verbs").is_ok());
        assert!(matches!(settings.scheme("nouns"), Err(DictationError::UnknownScheme { .. })));
        assert!(settings.remove_scheme("verbs"));
        assert!(!settings.remove_scheme("verbs"));
    }
}
