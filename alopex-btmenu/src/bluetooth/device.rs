/*!
 * Bluetooth Device Records
 * Address-keyed view of what the controller reports
 */

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{BtMenuError, Result};

/// Hardware address in `XX:XX:XX:XX:XX:XX` form, kept as the controller spelled it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self> {
        let groups: Vec<&str> = raw.split(':').collect();
        let well_formed = groups.len() == 6
            && groups
                .iter()
                .all(|g| g.len() == 2 && g.chars().all(|c| c.is_ascii_hexdigit()));

        if well_formed {
            Ok(Self(raw.to_string()))
        } else {
            Err(BtMenuError::InvalidAddress(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = BtMenuError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `<address> <name>` record as listed by the controller.
///
/// The address here is only the reconciliation key; it is checked against
/// [`Address`] syntax before it ever reaches the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLine {
    pub address: String,
    pub name: String,
}

impl DeviceLine {
    /// Returns `None` for blank lines.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let (address, name) = match raw.split_once(char::is_whitespace) {
            Some((address, name)) => (address, name.trim()),
            None => (raw, ""),
        };

        Some(Self {
            address: address.to_string(),
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub address: String,
    pub name: String,
    pub connected: bool,
}

impl Device {
    pub fn from_line(line: &DeviceLine, connected: bool) -> Self {
        Self {
            address: line.address.clone(),
            name: line.name.clone(),
            connected,
        }
    }

    /// Menu text for this device; the address always leads.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.address.clone()
        } else {
            format!("{} {}", self.address, self.name)
        }
    }
}

/// Reconciled devices keyed by address, in first-seen order.
pub type DeviceMap = IndexMap<String, Device>;
