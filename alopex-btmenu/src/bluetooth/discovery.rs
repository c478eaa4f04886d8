/*!
 * Bluetooth Device Discovery
 * Connected and paired device lists as reported by the controller
 */

use super::controller::{Command, Controller};
use super::device::DeviceLine;
use crate::error::{BtMenuError, Result};

/// Token that marks a device record in controller output.
pub const DEVICE_MARKER: &str = "Device ";

pub struct DeviceDiscovery<'a, C: ?Sized> {
    controller: &'a C,
}

impl<'a, C: Controller + ?Sized> DeviceDiscovery<'a, C> {
    pub fn new(controller: &'a C) -> Self {
        Self { controller }
    }

    pub async fn list_connected(&self) -> String {
        self.query(Command::ListConnected).await
    }

    pub async fn list_paired(&self) -> String {
        self.query(Command::ListPaired).await
    }

    pub async fn connected_devices(&self) -> Vec<DeviceLine> {
        extract_device_lines(&self.list_connected().await).collect()
    }

    pub async fn paired_devices(&self) -> Vec<DeviceLine> {
        extract_device_lines(&self.list_paired().await).collect()
    }

    // A failed query reads as "no devices".
    async fn query(&self, command: Command<'_>) -> String {
        match self.fetch(command).await {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("{}, assuming no devices", e);
                String::new()
            }
        }
    }

    async fn fetch(&self, command: Command<'_>) -> Result<String> {
        self.controller.run(command).await.map_err(|e| match e {
            BtMenuError::Controller { command, reason } => {
                BtMenuError::Discovery { command, reason }
            }
            other => BtMenuError::Discovery {
                command: command.to_string(),
                reason: other.to_string(),
            },
        })
    }
}

/// Device records in `text`, with the marker stripped.
pub fn extract_device_lines(text: &str) -> impl Iterator<Item = DeviceLine> + '_ {
    text.lines().filter_map(|line| {
        let start = line.find(DEVICE_MARKER)? + DEVICE_MARKER.len();
        DeviceLine::parse(&line[start..])
    })
}
