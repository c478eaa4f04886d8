/*!
 * Error kinds for the device menu pipeline
 */

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BtMenuError {
    #[error("controller query `{command}` failed: {reason}")]
    Discovery { command: String, reason: String },

    #[error("failed to prepare menu file: {0}")]
    Presentation(#[source] std::io::Error),

    #[error("picker `{program}` failed: {reason}")]
    Picker { program: String, reason: String },

    #[error("picker was dismissed without a selection")]
    Cancelled,

    #[error("selection does not match any known device: {0:?}")]
    Validation(String),

    #[error("selection {0:?} has no address field")]
    Format(String),

    #[error("invalid device address: {0:?}")]
    InvalidAddress(String),

    #[error("controller `{command}` failed: {reason}")]
    Controller { command: String, reason: String },

    #[error("controller command `{command}` failed: {reason}")]
    Connection { command: String, reason: String },

    #[error("config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, BtMenuError>;
