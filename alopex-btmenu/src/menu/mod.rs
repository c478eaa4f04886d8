/*!
 * Device Menu
 * Renders devices as status-prefixed lines for the external picker
 */

pub mod picker;

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::bluetooth::Device;
use crate::error::{BtMenuError, Result};

pub use picker::{CommandPicker, Picker};

pub const CONNECTED_GLYPH: &str = "󰂱";
pub const DISCONNECTED_GLYPH: &str = "󰂲";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Glyphs {
    pub connected: String,
    pub disconnected: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            connected: CONNECTED_GLYPH.to_string(),
            disconnected: DISCONNECTED_GLYPH.to_string(),
        }
    }
}

impl Glyphs {
    pub fn glyph_for(&self, connected: bool) -> &str {
        if connected {
            &self.connected
        } else {
            &self.disconnected
        }
    }

    /// Problems that would make rendered lines ambiguous to parse back.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let glyphs = [
            ("connected", &self.connected),
            ("disconnected", &self.disconnected),
        ];
        for (which, glyph) in glyphs {
            if glyph.is_empty() {
                return Err(format!("{} glyph is empty", which));
            }
            if glyph.chars().any(char::is_whitespace) {
                return Err(format!("{} glyph contains whitespace", which));
            }
        }
        // The connected glyph must never match the separator or an address.
        if self
            .connected
            .chars()
            .any(|c| c == ':' || c.is_ascii_hexdigit())
        {
            return Err("connected glyph must not contain ':' or hex digits".to_string());
        }
        if self.disconnected.contains(self.connected.as_str()) {
            return Err("disconnected glyph must not contain the connected glyph".to_string());
        }
        Ok(())
    }
}

/// One `"{glyph}: {address} {name}"` line per device, in the given order.
pub fn render(devices: &[Device], glyphs: &Glyphs) -> Vec<String> {
    devices
        .iter()
        .map(|device| format!("{}: {}", glyphs.glyph_for(device.connected), device.label()))
        .collect()
}

/// Run-scoped menu file handed to the picker. Deleted when dropped.
pub struct ScratchMenu {
    file: NamedTempFile,
}

impl ScratchMenu {
    pub fn create(dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("bluetooth").suffix(".menu");

        let file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(BtMenuError::Presentation)?;

        tracing::debug!("Created menu file {}", file.path().display());
        Ok(Self { file })
    }

    pub fn write(&mut self, devices: &[Device], glyphs: &Glyphs) -> Result<()> {
        for line in render(devices, glyphs) {
            tracing::debug!("{}", line);
            writeln!(self.file, "{}", line).map_err(BtMenuError::Presentation)?;
        }
        self.file.flush().map_err(BtMenuError::Presentation)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl Drop for ScratchMenu {
    fn drop(&mut self) {
        tracing::debug!("Removing menu file {}", self.file.path().display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bluetooth::DeviceLine;

    fn device(raw: &str, connected: bool) -> Device {
        Device::from_line(&DeviceLine::parse(raw).unwrap(), connected)
    }

    #[test]
    fn glyph_for_maps_both_states() {
        let glyphs = Glyphs::default();
        assert_eq!(glyphs.glyph_for(true), CONNECTED_GLYPH);
        assert_eq!(glyphs.glyph_for(false), DISCONNECTED_GLYPH);
    }

    #[test]
    fn renders_in_given_order() {
        let devices = vec![
            device("AA:11:22:33:44:55 Phone", true),
            device("BB:22:33:44:55:66 Watch", false),
        ];

        let lines = render(&devices, &Glyphs::default());
        assert_eq!(
            lines,
            vec![
                format!("{}: AA:11:22:33:44:55 Phone", CONNECTED_GLYPH),
                format!("{}: BB:22:33:44:55:66 Watch", DISCONNECTED_GLYPH),
            ]
        );
    }

    #[test]
    fn scratch_file_holds_rendered_lines_and_is_removed_on_drop() {
        let glyphs = Glyphs {
            connected: "+".to_string(),
            disconnected: "-".to_string(),
        };
        let mut menu = ScratchMenu::create(None).unwrap();
        menu.write(&[device("AA:11:22:33:44:55 Phone", false)], &glyphs)
            .unwrap();

        let path = menu.path().to_path_buf();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "-: AA:11:22:33:44:55 Phone\n"
        );

        drop(menu);
        assert!(!path.exists());
    }

    #[test]
    fn scratch_file_with_no_devices_is_empty() {
        let mut menu = ScratchMenu::create(None).unwrap();
        menu.write(&[], &Glyphs::default()).unwrap();
        assert_eq!(std::fs::read_to_string(menu.path()).unwrap(), "");
    }

    #[test]
    fn unusable_directory_is_a_presentation_error() {
        let err = ScratchMenu::create(Some(Path::new("/nonexistent/btmenu"))).err();
        assert!(matches!(err, Some(BtMenuError::Presentation(_))));
    }

    #[test]
    fn glyph_validation() {
        assert!(Glyphs::default().validate().is_ok());

        let spaced = Glyphs {
            connected: "on line".to_string(),
            ..Glyphs::default()
        };
        assert!(spaced.validate().is_err());

        let nested = Glyphs {
            connected: "*".to_string(),
            disconnected: "**".to_string(),
        };
        assert!(nested.validate().is_err());

        for connected in [":", "A", "f", "x7"] {
            let clashing = Glyphs {
                connected: connected.to_string(),
                disconnected: "-".to_string(),
            };
            assert!(clashing.validate().is_err(), "{connected:?} should be rejected");
        }

        let empty = Glyphs {
            disconnected: String::new(),
            ..Glyphs::default()
        };
        assert!(empty.validate().is_err());
    }
}
