/*!
 * Menu Pipeline
 * Discover, present, resolve and act; runs exactly once per invocation
 */

use std::path::PathBuf;
use tracing::{info_span, Instrument, Span};

use crate::bluetooth::{
    build_device_map, sort_by_connected, Address, ConnectionController, Controller,
    DeviceDiscovery, DeviceMap,
};
use crate::error::{BtMenuError, Result};
use crate::menu::{Glyphs, Picker, ScratchMenu};
use crate::selection::{extract_address, is_valid_selection, resolve_action, Action};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovering,
    Presenting,
    Validating,
    Acting,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Discovering => "discovering",
            Stage::Presenting => "presenting",
            Stage::Validating => "validating",
            Stage::Acting => "acting",
        }
    }

    fn span(&self) -> Span {
        info_span!("stage", name = self.as_str())
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command was issued; `applied` is false when the controller reported failure.
    Done {
        action: Action,
        address: Address,
        applied: bool,
    },
    Cancelled,
    Invalid {
        selection: String,
    },
}

pub struct Pipeline<C, P> {
    controller: C,
    picker: P,
    glyphs: Glyphs,
    scratch_dir: Option<PathBuf>,
}

impl<C: Controller, P: Picker> Pipeline<C, P> {
    pub fn new(controller: C, picker: P, glyphs: Glyphs) -> Self {
        Self {
            controller,
            picker,
            glyphs,
            scratch_dir: None,
        }
    }

    /// Directory for the menu file; the system temp dir otherwise.
    pub fn with_scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scratch_dir = dir;
        self
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    /// Only a menu file that cannot be prepared is returned as an error;
    /// every other failure ends the run with an [`Outcome`].
    pub async fn run(&self) -> Result<Outcome> {
        let devices = self.discover().instrument(Stage::Discovering.span()).await;

        // Held until the run ends; dropping it deletes the file.
        let menu = {
            let _entered = Stage::Presenting.span().entered();
            self.render(&devices)?
        };

        let selection = match self
            .picker
            .pick(menu.path())
            .instrument(Stage::Presenting.span())
            .await
        {
            Ok(selection) => selection,
            Err(BtMenuError::Cancelled) => {
                tracing::info!("No device selected");
                return Ok(Outcome::Cancelled);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                return Ok(Outcome::Cancelled);
            }
        };

        let address = {
            let _entered = Stage::Validating.span().entered();
            match self.validate(&selection, &devices) {
                Ok(address) => address,
                Err(e) => {
                    tracing::warn!("Invalid selection: {}", e);
                    return Ok(Outcome::Invalid { selection });
                }
            }
        };

        let action = resolve_action(&selection, &self.glyphs);
        let applied = self
            .act(action, &address)
            .instrument(Stage::Acting.span())
            .await;

        Ok(Outcome::Done {
            action,
            address,
            applied,
        })
    }

    async fn discover(&self) -> DeviceMap {
        let discovery = DeviceDiscovery::new(&self.controller);
        let connected = discovery.connected_devices().await;
        let paired = discovery.paired_devices().await;

        let devices = build_device_map(&connected, &paired);
        tracing::debug!(
            connected = connected.len(),
            paired = paired.len(),
            known = devices.len(),
            "Discovered devices"
        );
        devices
    }

    fn render(&self, devices: &DeviceMap) -> Result<ScratchMenu> {
        let mut menu = ScratchMenu::create(self.scratch_dir.as_deref())?;
        menu.write(&sort_by_connected(devices), &self.glyphs)?;
        Ok(menu)
    }

    fn validate(&self, selection: &str, devices: &DeviceMap) -> Result<Address> {
        if !is_valid_selection(selection, devices) {
            return Err(BtMenuError::Validation(selection.to_string()));
        }
        tracing::debug!("Selection matches a known device");

        Address::parse(extract_address(selection)?)
    }

    async fn act(&self, action: Action, address: &Address) -> bool {
        let connection = ConnectionController::new(&self.controller);

        if let Err(e) = connection.set_adapter_power(true).await {
            tracing::warn!("Failed to power on adapter: {}", e);
        }

        let result = match action {
            Action::Connect => connection.connect(address).await,
            Action::Disconnect => connection.disconnect(address).await,
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }
}
