/*!
 * Selection Resolution
 * Maps the picker's echoed line back to a device and a requested action
 */

use std::fmt;

use crate::bluetooth::DeviceMap;
use crate::error::{BtMenuError, Result};
use crate::menu::Glyphs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Disconnect,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Connect => f.write_str("connect"),
            Action::Disconnect => f.write_str("disconnect"),
        }
    }
}

/// True when `selected` embeds the address of any known device.
///
/// Containment, not equality: a line naming one device while embedding
/// another device's address is also accepted.
pub fn is_valid_selection(selected: &str, devices: &DeviceMap) -> bool {
    devices.keys().any(|address| selected.contains(address.as_str()))
}

/// Address field of a rendered `"{glyph}: {address} {name}"` line.
pub fn extract_address(selected: &str) -> Result<&str> {
    selected
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| BtMenuError::Format(selected.to_string()))
}

/// The glyph echoed back still reflects the state at render time, so the
/// request is always its toggle.
pub fn resolve_action(selected: &str, glyphs: &Glyphs) -> Action {
    if selected.contains(glyphs.connected.as_str()) {
        Action::Disconnect
    } else {
        Action::Connect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bluetooth::{build_device_map, DeviceLine};
    use crate::menu::CONNECTED_GLYPH;
    use proptest::prelude::*;

    fn known(addresses: &[&str]) -> DeviceMap {
        let paired: Vec<_> = addresses
            .iter()
            .filter_map(|a| DeviceLine::parse(a))
            .collect();
        build_device_map(&[], &paired)
    }

    #[test]
    fn extracts_second_token() {
        let line = format!("{}: AA:11:22:33:44:55 My-Headset", CONNECTED_GLYPH);
        assert_eq!(extract_address(&line).unwrap(), "AA:11:22:33:44:55");
    }

    #[test]
    fn too_few_tokens_is_a_format_error() {
        assert!(matches!(extract_address("lonely"), Err(BtMenuError::Format(_))));
        assert!(matches!(extract_address(""), Err(BtMenuError::Format(_))));
    }

    #[test]
    fn action_toggles_rendered_state() {
        let glyphs = Glyphs::default();
        let connected = format!("{}: AA:11:22:33:44:55 Phone", glyphs.connected);
        let disconnected = format!("{}: AA:11:22:33:44:55 Phone", glyphs.disconnected);

        assert_eq!(resolve_action(&connected, &glyphs), Action::Disconnect);
        assert_eq!(resolve_action(&disconnected, &glyphs), Action::Connect);
        assert_eq!(Action::Disconnect.to_string(), "disconnect");
    }

    #[test]
    fn validation_uses_containment() {
        let devices = known(&["AA:11:22:33:44:55 Phone"]);

        assert!(is_valid_selection("x: AA:11:22:33:44:55 Phone", &devices));
        assert!(is_valid_selection("anything AA:11:22:33:44:55", &devices));
        assert!(!is_valid_selection("x: BB:22:33:44:55:66 Watch", &devices));
        assert!(!is_valid_selection("", &devices));
        assert!(!is_valid_selection("x: AA:11:22:33:44:55", &known(&[])));
    }

    proptest! {
        #[test]
        fn resolve_action_follows_connected_glyph(prefix in ".{0,12}", suffix in ".{0,12}", with_glyph in any::<bool>()) {
            let glyphs = Glyphs::default();
            let text = if with_glyph {
                format!("{}{}{}", prefix, glyphs.connected, suffix)
            } else {
                format!("{}{}", prefix, suffix)
            };

            let expected = if text.contains(CONNECTED_GLYPH) {
                Action::Disconnect
            } else {
                Action::Connect
            };
            prop_assert_eq!(resolve_action(&text, &glyphs), expected);
        }

        #[test]
        fn valid_iff_some_address_embedded(
            ids in proptest::collection::vec(0u8..=255, 1..8),
            probe in 0u8..=255,
        ) {
            let addresses: Vec<String> = ids
                .iter()
                .map(|id| format!("AA:BB:CC:DD:EE:{:02X}", id))
                .collect();
            let raw: Vec<&str> = addresses.iter().map(String::as_str).collect();
            let devices = known(&raw);

            let selection = format!("-: AA:BB:CC:DD:EE:{:02X} Device", probe);
            prop_assert_eq!(is_valid_selection(&selection, &devices), ids.contains(&probe));
        }
    }
}
