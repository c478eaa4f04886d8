/*!
 * ALOPEX Bluetooth Device Menu
 * Connect and disconnect paired devices from rofi
 * Onyx Digital Intelligence Development LLC
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use alopex_btmenu::bluetooth::Bluetoothctl;
use alopex_btmenu::menu::CommandPicker;
use alopex_btmenu::version::BuildInfo;
use alopex_btmenu::{logging, MenuConfig, Outcome, Pipeline};

#[derive(Parser)]
#[command(name = "btmenu")]
#[command(about = "Connect or disconnect a paired Bluetooth device")]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print build information and exit
    #[arg(short = 'v', long)]
    version: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        print!("{}", BuildInfo::current());
        return Ok(());
    }

    // Load configuration
    let config = match cli.config.or_else(MenuConfig::default_path) {
        Some(path) => MenuConfig::load(&path)?,
        None => MenuConfig::default(),
    };

    // Initialize logging
    logging::init(&config.log, cli.debug).context("failed to initialize logging")?;

    let pipeline = Pipeline::new(
        Bluetoothctl::new(&config.controller.command),
        CommandPicker::new(config.picker.clone()),
        config.glyphs.clone(),
    )
    .with_scratch_dir(config.scratch_dir.clone());

    match pipeline.run().await? {
        Outcome::Done {
            action,
            address,
            applied,
        } => info!(%action, %address, applied, "Done"),
        Outcome::Cancelled => info!("Cancelled"),
        Outcome::Invalid { selection } => info!(?selection, "Invalid selection"),
    }

    Ok(())
}
