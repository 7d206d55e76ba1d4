//! # keystack-config
//!
//! Loader of `keyboard.toml`, the declarative keymap definition of a keystack keyboard.
//!
//! ```toml
//! [keyboard]
//! name = "planck"
//!
//! [layout]
//! rows = 4
//! cols = 12
//! layers = 4
//!
//! [[layer]]
//! name = "qwerty"
//! keys = "Tab Q W E R T Y U I O P Bspc ..."
//!
//! [behavior.tri_layer]
//! lower = "lower"
//! upper = "raise"
//! adjust = "adjust"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::de;
use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

pub mod behavior;
pub mod error;
pub mod keycode_alias;
pub mod layout;
pub mod storage;

pub use error::{ConfigError, ConfigResult};
pub use keycode_alias::KEYCODE_ALIAS;
pub use layout::{LayoutConfig, parse_keycode};

/// Configurations of a keystack keyboard, the content of `keyboard.toml`
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyboardTomlConfig {
    /// Basic keyboard info
    pub keyboard: Option<KeyboardInfo>,
    /// Size of the keymap
    pub layout: LayoutTomlConfig,
    /// Layers of key maps
    pub layer: Option<Vec<LayerTomlConfig>>,
    /// Aliases for key maps
    pub aliases: Option<HashMap<String, String>>,
    /// Behavior config
    pub behavior: Option<BehaviorTomlConfig>,
    /// Storage config
    pub storage: Option<StorageTomlConfig>,
}

impl KeyboardTomlConfig {
    /// Read and parse the `keyboard.toml` at the given path
    pub fn new_from_toml_path<P: AsRef<Path>>(config_toml_path: P) -> ConfigResult<Self> {
        let path = config_toml_path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str::<KeyboardTomlConfig>(&s).map_err(|e| ConfigError::TomlParse {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })
    }

    pub fn new_from_toml_str(config: &str) -> ConfigResult<Self> {
        toml::from_str::<KeyboardTomlConfig>(config).map_err(|e| ConfigError::TomlParse {
            path: "<string>".to_string(),
            message: e.message().to_string(),
        })
    }

    /// Name of the keyboard, "keyboard" if not set
    pub fn name(&self) -> &str {
        self.keyboard
            .as_ref()
            .map(|k| k.name.as_str())
            .unwrap_or("keyboard")
    }
}

/// Basic keyboard info
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyboardInfo {
    pub name: String,
}

/// Configurations for keyboard layout
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutTomlConfig {
    pub rows: u8,
    pub cols: u8,
    pub layers: u8,
    /// Matrix positions of the keys in `[[layer]]`, in order, such as `"(0,0) (0,1) (1,0)"`
    pub matrix_map: Option<String>,
}

/// A `[[layer]]` entry
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerTomlConfig {
    pub name: Option<String>,
    pub keys: String,
}

/// Configurations for actions behavior
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorTomlConfig {
    pub tri_layer: Option<TriLayerTomlConfig>,
    pub one_shot: Option<OneShotTomlConfig>,
}

/// A layer given by number or by name
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LayerRef {
    Number(u8),
    Name(String),
}

/// Configurations for tri layer
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriLayerTomlConfig {
    pub upper: LayerRef,
    pub lower: LayerRef,
    pub adjust: LayerRef,
}

/// Configurations for one shot
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OneShotTomlConfig {
    pub timeout: Option<DurationMillis>,
}

/// Configurations for storage
#[serde_inline_default]
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageTomlConfig {
    /// Start address of local storage, MUST BE start of a sector.
    /// If start_addr is set to 0(this is the default value), the last `num_sectors` sectors will be used.
    #[serde_inline_default(0)]
    pub start_addr: usize,
    /// How many sectors are used for storage, the default value is 2
    #[serde_inline_default(2)]
    pub num_sectors: u8,
    #[serde_inline_default(false)]
    pub clear_storage: bool,
}

/// A duration written as `"1s"` or `"500ms"`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct DurationMillis(#[serde(deserialize_with = "parse_duration_millis")] pub u64);

fn parse_duration_millis<'de, D: de::Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let input: String = de::Deserialize::deserialize(deserializer)?;
    let num = input.trim_end_matches(|c: char| !c.is_numeric());
    let unit = &input[num.len()..];
    let num: u64 = num.parse().map_err(|_| {
        de::Error::custom(format!(
            "Invalid number \"{num}\" in duration: number part must be a u64"
        ))
    })?;

    match unit {
        "s" => Ok(num * 1000),
        "ms" => Ok(num),
        other => Err(de::Error::custom(format!(
            "Invalid duration unit \"{other}\": unit part must be either \"s\" or \"ms\""
        ))),
    }
}
