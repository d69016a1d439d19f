//! Subcommand handlers.

pub mod check;
pub mod dictate;
pub mod schemes;

use std::path::PathBuf;

use anyhow::Context as _;
use dictation_core::Settings;

use crate::workbook::TsvWorkbook;

/// Settings plus where they came from, shared by every subcommand.
pub struct Context {
    pub settings_path: PathBuf,
    pub settings: Settings,
    workbook_override: Option<PathBuf>,
}

impl Context {
    pub fn load(settings_path: PathBuf, workbook_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let settings = Settings::load(&settings_path)
            .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;
        Ok(Self {
            settings_path,
            settings,
            workbook_override,
        })
    }

    /// `--workbook` if given, else the vocabulary path from the settings.
    pub fn workbook(&self) -> anyhow::Result<TsvWorkbook> {
        let dir = self
            .workbook_override
            .clone()
            .or_else(|| self.settings.vocabulary_path.clone())
            .context("no workbook configured: pass --workbook or set vocabulary_path in the settings")?;
        TsvWorkbook::open(dir)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.settings
            .save(&self.settings_path)
            .with_context(|| format!("failed to save settings to {}", self.settings_path.display()))
    }
}
