/*!
 * Bluetooth Controller Commands
 * Drives bluetoothctl with discrete arguments, one process per command
 */

use async_trait::async_trait;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command as Process;

use super::device::Address;
use crate::error::{BtMenuError, Result};

/// The fixed set of commands the menu sends to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Power(bool),
    ListConnected,
    ListPaired,
    Connect(&'a Address),
    Disconnect(&'a Address),
}

impl<'a> Command<'a> {
    pub fn args(&self) -> Vec<&'a str> {
        match *self {
            Command::Power(true) => vec!["power", "on"],
            Command::Power(false) => vec!["power", "off"],
            Command::ListConnected => vec!["devices", "Connected"],
            Command::ListPaired => vec!["devices"],
            Command::Connect(address) => vec!["connect", address.as_str()],
            Command::Disconnect(address) => vec!["disconnect", address.as_str()],
        }
    }
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args().join(" "))
    }
}

#[async_trait]
pub trait Controller: Send + Sync {
    /// Runs one command and returns the controller's captured stdout.
    async fn run(&self, command: Command<'_>) -> Result<String>;
}

/// `bluetoothctl`, optionally behind a wrapper such as `sudo`.
pub struct Bluetoothctl {
    program: String,
    leading_args: Vec<String>,
}

impl Bluetoothctl {
    /// `command` is the program followed by any fixed leading arguments.
    pub fn new(command: &[String]) -> Self {
        let (program, leading_args) = match command.split_first() {
            Some((program, rest)) => (program.clone(), rest.to_vec()),
            None => ("bluetoothctl".to_string(), Vec::new()),
        };

        Self {
            program,
            leading_args,
        }
    }
}

impl Default for Bluetoothctl {
    fn default() -> Self {
        Self::new(&[])
    }
}

#[async_trait]
impl Controller for Bluetoothctl {
    async fn run(&self, command: Command<'_>) -> Result<String> {
        tracing::debug!(program = %self.program, %command, "running controller");

        let output = Process::new(&self.program)
            .args(&self.leading_args)
            .args(command.args())
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| BtMenuError::Controller {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BtMenuError::Controller {
                command: command.to_string(),
                reason: format!("{} ({})", output.status, stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Power and connection management on top of a [`Controller`].
pub struct ConnectionController<'a, C: ?Sized> {
    controller: &'a C,
}

impl<'a, C: Controller + ?Sized> ConnectionController<'a, C> {
    pub fn new(controller: &'a C) -> Self {
        Self { controller }
    }

    pub async fn set_adapter_power(&self, on: bool) -> Result<()> {
        self.issue(Command::Power(on)).await
    }

    pub async fn connect(&self, address: &Address) -> Result<()> {
        self.issue(Command::Connect(address)).await
    }

    pub async fn disconnect(&self, address: &Address) -> Result<()> {
        self.issue(Command::Disconnect(address)).await
    }

    // Single attempt; the response text is not inspected.
    async fn issue(&self, command: Command<'_>) -> Result<()> {
        tracing::info!("{}", command);

        match self.controller.run(command).await {
            Ok(_) => Ok(()),
            Err(BtMenuError::Controller { command, reason }) => {
                Err(BtMenuError::Connection { command, reason })
            }
            Err(e) => Err(e),
        }
    }
}
