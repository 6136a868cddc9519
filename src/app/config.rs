use crate::app::state::SettlementPolicy;
use crate::domain::models::{CssColor, FormatCommand};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_FOREGROUND: &[&str] = &[
    "#000000", "#434343", "#666666", "#999999", "#cccccc", "#ffffff", "#e03131", "#f08c00",
    "#fab005", "#2f9e44", "#1971c2", "#9c36b5",
];

const DEFAULT_BACKGROUND: &[&str] = &[
    "#ffe066", "#ffc9c9", "#b2f2bb", "#a5d8ff", "#d0bfff", "#fcc2d7", "#ffd8a8", "#c3fae8",
    "#e9ecef", "#fff3bf", "#d3f9d8", "#dbe4ff",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub toolbar: ToolbarConfig,
    pub generation: GenerationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    pub foreground: PickerConfig,
    pub background: PickerConfig,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            foreground: PickerConfig::new("foreColor", "Text color", DEFAULT_FOREGROUND),
            background: PickerConfig::new("backColor", "Highlight color", DEFAULT_BACKGROUND),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    pub command: FormatCommand,
    pub label: String,
    pub colors: Vec<CssColor>,
}

impl PickerConfig {
    fn new(command: &str, label: &str, colors: &[&str]) -> Self {
        Self {
            command: command.into(),
            label: label.to_string(),
            colors: colors.iter().map(|c| CssColor::from(*c)).collect(),
        }
    }
}

/// Where generated text goes in the editor content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMode {
    #[default]
    Replace,
    Append,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub settlement: SettlementPolicy,
    pub insert: InsertMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("scribe");
        path.push("config.toml");
        path
    })
}

impl EditorConfig {
    /// Loads the user config, falling back to defaults when the file is
    /// missing or unusable.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = get_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for picker in [&self.toolbar.foreground, &self.toolbar.background] {
            if picker.colors.is_empty() {
                bail!("color picker '{}' has no colors", picker.command);
            }
        }
        Ok(())
    }
}
