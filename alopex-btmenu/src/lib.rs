/*!
 * ALOPEX Bluetooth Device Menu
 * Pick a paired device from a launcher menu and toggle its connection
 */

pub mod bluetooth;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod pipeline;
pub mod selection;
pub mod version;

pub use config::MenuConfig;
pub use error::{BtMenuError, Result};
pub use pipeline::{Outcome, Pipeline, Stage};
