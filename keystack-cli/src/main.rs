//! Host tool of keystack.
//!
//! - `show`: print the layers of a `keyboard.toml`, or the keymap resolved with some layers active
//! - `replay`: feed a script of key events to the keymap, the flash image is kept in a file so
//!   persisted settings survive across runs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use embassy_futures::block_on;
use keystack::config::{BehaviorConfig, StorageConfig};
use keystack::keymap::KeyMap;
use keystack::storage::{FlashStorage, RamFlash};
use keystack::types::action::KeyAction;
use keystack_config::{KeyboardTomlConfig, LayoutConfig};

mod display;
mod replay;
mod script;

use display::{layer_title, print_grid};
use replay::Replay;

/// Maximum keymap size the tool handles
pub(crate) const MAX_ROW: usize = 12;
pub(crate) const MAX_COL: usize = 24;
pub(crate) const MAX_LAYER: usize = 16;

/// Size of the emulated flash
pub(crate) const FLASH_SIZE: usize = 16 * 1024;

pub(crate) type Flash = RamFlash<FLASH_SIZE>;
pub(crate) type Layers = [[[KeyAction; MAX_COL]; MAX_ROW]; MAX_LAYER];

#[derive(Parser)]
#[command(name = "keystack")]
#[command(about = "Inspect keystack keymaps and replay key events against them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the layers of a keymap
    Show {
        /// Path to keyboard.toml
        config: PathBuf,

        /// Print the keymap resolved with these layers active, by name or number
        #[arg(short, long, value_delimiter = ',')]
        active: Vec<String>,
    },

    /// Replay a script of key events
    Replay {
        /// Path to keyboard.toml
        config: PathBuf,

        /// Script file, one command per line
        script: PathBuf,

        /// Flash image, loaded if it exists and saved after the replay
        #[arg(short, long, value_name = "FILE")]
        flash: Option<PathBuf>,
    },
}

/// A loaded `keyboard.toml`
pub(crate) struct Keymap {
    pub(crate) layout: LayoutConfig,
    pub(crate) behavior: BehaviorConfig,
    pub(crate) storage: StorageConfig,
    pub(crate) layers: Box<Layers>,
}

impl Keymap {
    fn load(path: &Path) -> Result<Self> {
        let config = KeyboardTomlConfig::new_from_toml_path(path)?;
        Self::new(&config).with_context(|| format!("Invalid keymap in {}", path.display()))
    }

    fn new(config: &KeyboardTomlConfig) -> Result<Self> {
        let layout = config.get_layout_config()?;
        let behavior = config.get_behavior_config(&layout)?;
        let storage = config.get_storage_config()?;
        if storage.num_sectors as usize * Flash::SECTOR_SIZE > FLASH_SIZE
            || storage.start_addr % Flash::SECTOR_SIZE != 0
            || storage.start_addr + storage.num_sectors as usize * Flash::SECTOR_SIZE > FLASH_SIZE
        {
            bail!(
                "[storage] doesn't fit in the {} KB emulated flash with {} byte sectors",
                FLASH_SIZE / 1024,
                Flash::SECTOR_SIZE
            );
        }
        let layers = pad_layers(&layout)?;
        log::info!(
            "Loaded {}: {} layers of {}x{}",
            config.name(),
            layout.layers,
            layout.rows,
            layout.cols
        );
        Ok(Self {
            layout,
            behavior,
            storage,
            layers,
        })
    }

    /// Layer number of a layer name or number
    pub(crate) fn layer(&self, layer: &str) -> Result<u8> {
        self.layout
            .layer_index(layer)
            .with_context(|| format!("Undefined layer '{}'", layer))
    }
}

/// Place the keymap in the top left corner of the largest supported keymap.
///
/// Extra layers are transparent, so they never change the resolved keys.
fn pad_layers(layout: &LayoutConfig) -> Result<Box<Layers>> {
    if layout.rows as usize > MAX_ROW || layout.cols as usize > MAX_COL || layout.layers as usize > MAX_LAYER {
        bail!(
            "The keymap is {} layers of {}x{}, the largest supported one is {} layers of {}x{}",
            layout.layers,
            layout.rows,
            layout.cols,
            MAX_LAYER,
            MAX_ROW,
            MAX_COL
        );
    }
    let mut layers: Box<Layers> = vec![[[KeyAction::Transparent; MAX_COL]; MAX_ROW]; MAX_LAYER]
        .into_boxed_slice()
        .try_into()
        .map_err(|_| anyhow::anyhow!("Failed to allocate the keymap"))?;
    for (layer, src_layer) in layers.iter_mut().zip(&layout.keymap) {
        *layer = [[KeyAction::No; MAX_COL]; MAX_ROW];
        for (row, src_row) in layer.iter_mut().zip(src_layer) {
            row[..src_row.len()].copy_from_slice(src_row);
        }
    }
    Ok(layers)
}

fn load_flash(path: Option<&Path>) -> Result<Flash> {
    match path {
        Some(path) if path.exists() => {
            let image = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            Flash::from_image(&image).map_err(|e| {
                anyhow::anyhow!(
                    "{} is not a {} byte flash image: {:?}",
                    path.display(),
                    FLASH_SIZE,
                    e
                )
            })
        }
        _ => Ok(Flash::new()),
    }
}

fn show(config: &Path, active: &[String]) -> Result<()> {
    let keymap = Keymap::load(config)?;
    let layout = &keymap.layout;

    if active.is_empty() {
        for (layer_num, layer) in layout.keymap.iter().enumerate() {
            println!("{}", layer_title(layout, layer_num as u8));
            print_grid(layer.iter().map(|row| row.as_slice()));
        }
        return Ok(());
    }

    let mut resolver = KeyMap::new(&*keymap.layers, keymap.behavior);
    for layer in active {
        resolver.activate_layer(keymap.layer(layer)?);
    }
    let resolved = resolver.resolve_all();
    println!(
        "Resolved, highest layer: {}",
        layer_title(layout, resolver.active_layer())
    );
    print_grid(
        resolved[..layout.rows as usize]
            .iter()
            .map(|row| &row[..layout.cols as usize]),
    );
    Ok(())
}

fn replay(config: &Path, script_path: &Path, flash_path: Option<&Path>) -> Result<()> {
    let keymap = Keymap::load(config)?;
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let commands = script::parse_script(&source)?;

    let flash = load_flash(flash_path)?;
    let storage = block_on(FlashStorage::new(flash, &keymap.storage));
    let mut replay = Replay::new(&keymap, storage);
    for (line, command) in commands {
        replay
            .run(command)
            .with_context(|| format!("{}:{}", script_path.display(), line))?;
    }

    if let Some(path) = flash_path {
        let flash = replay.into_flash();
        fs::write(path, flash.image()).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved flash image to {}", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Show { config, active } => show(config, active),
        Commands::Replay { config, script, flash } => replay(config, script, flash.as_deref()),
    }
}
