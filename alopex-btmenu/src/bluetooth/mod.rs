pub mod controller;
pub mod device;
pub mod discovery;
pub mod reconcile;

pub use controller::{Bluetoothctl, Command, ConnectionController, Controller};
pub use device::{Address, Device, DeviceLine, DeviceMap};
pub use discovery::{extract_device_lines, DeviceDiscovery};
pub use reconcile::{build_device_map, sort_by_connected};
