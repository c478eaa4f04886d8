use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BtMenuError, Result};
use crate::logging::LogConfig;
use crate::menu::picker::PickerConfig;
use crate::menu::Glyphs;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Where the menu file is created; the system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
    pub controller: ControllerConfig,
    pub picker: PickerConfig,
    pub glyphs: Glyphs,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Program and leading arguments, e.g. `["sudo", "bluetoothctl"]`.
    pub command: Vec<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            command: vec!["bluetoothctl".to_string()],
        }
    }
}

impl MenuConfig {
    /// `$XDG_CONFIG_HOME/btmenu/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("btmenu").join("config.toml"))
    }

    /// Missing files fall back to defaults; unreadable or invalid ones do not.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| Self::error(path, e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(Self::error(path, e)),
        };

        config.validate().map_err(|reason| Self::error(path, reason))?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.controller.command.is_empty() {
            return Err("controller.command must name a program".to_string());
        }
        if self.picker.command.trim().is_empty() {
            return Err("picker.command must name a program".to_string());
        }
        self.glyphs.validate()?;
        self.log.validate()
    }

    fn error(path: &Path, reason: impl ToString) -> BtMenuError {
        BtMenuError::Config {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
