/*!
 * Device Reconciliation
 * One record per address, connected entries take precedence
 */

use super::device::{Device, DeviceLine, DeviceMap};

pub fn build_device_map(connected: &[DeviceLine], paired: &[DeviceLine]) -> DeviceMap {
    let mut devices = DeviceMap::new();

    for line in connected {
        devices.insert(line.address.clone(), Device::from_line(line, true));
    }

    for line in paired {
        devices
            .entry(line.address.clone())
            .or_insert_with(|| Device::from_line(line, false));
    }

    devices
}

/// Connected devices first; insertion order is kept within each group.
pub fn sort_by_connected(devices: &DeviceMap) -> Vec<Device> {
    let mut sorted: Vec<Device> = devices.values().cloned().collect();
    sorted.sort_by_key(|device| !device.connected);
    sorted
}
