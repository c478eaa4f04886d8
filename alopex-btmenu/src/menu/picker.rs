/*!
 * External Picker
 * Blocks on rofi (or any dmenu-style program) until the user chooses a line
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{BtMenuError, Result};

pub const INPUT_PLACEHOLDER: &str = "{input}";
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";

#[async_trait]
pub trait Picker: Send + Sync {
    /// Returns the selected line, or [`BtMenuError::Cancelled`] when nothing was chosen.
    async fn pick(&self, menu: &Path) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PickerConfig {
    pub command: String,
    pub args: Vec<String>,
    pub prompt: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            command: "rofi".to_string(),
            args: [
                "-dmenu",
                "-input",
                INPUT_PLACEHOLDER,
                "-i",
                "-p",
                PROMPT_PLACEHOLDER,
                "-keep-right",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            prompt: "Bluetooth".to_string(),
        }
    }
}

/// Picker run as a child process.
///
/// The menu path replaces `{input}` in the arguments; when no argument
/// mentions it, the menu is piped to the picker's stdin instead.
pub struct CommandPicker {
    config: PickerConfig,
}

impl CommandPicker {
    pub fn new(config: PickerConfig) -> Self {
        Self { config }
    }

    fn reads_stdin(&self) -> bool {
        !self.config.args.iter().any(|a| a.contains(INPUT_PLACEHOLDER))
    }

    fn args_for(&self, menu: &Path) -> Vec<String> {
        let input = menu.to_string_lossy();
        self.config
            .args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(PROMPT_PLACEHOLDER, &self.config.prompt)
            })
            .collect()
    }
}

#[async_trait]
impl Picker for CommandPicker {
    async fn pick(&self, menu: &Path) -> Result<String> {
        let failed = |reason: String| BtMenuError::Picker {
            program: self.config.command.clone(),
            reason,
        };

        let stdin = if self.reads_stdin() {
            Stdio::from(std::fs::File::open(menu).map_err(|e| failed(e.to_string()))?)
        } else {
            Stdio::null()
        };

        let output = Command::new(&self.config.command)
            .args(self.args_for(menu))
            .stdin(stdin)
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !output.status.success() {
            tracing::debug!("Picker exited with {}", output.status);
            return Err(BtMenuError::Cancelled);
        }

        let selection = String::from_utf8_lossy(&output.stdout);
        let selection = selection.trim_end_matches(['\r', '\n']);
        if selection.trim().is_empty() {
            return Err(BtMenuError::Cancelled);
        }

        Ok(selection.to_string())
    }
}
