//! Persistence of the default layer and keymap options.
//!
//! The keyboard talks to a [`KeyboardStorage`], which is `()` when nothing is
//! persisted, or a [`FlashStorage`] on top of a NOR flash.

#[cfg(feature = "storage")]
mod flash;
#[cfg(feature = "storage")]
mod ram_flash;

#[cfg(feature = "storage")]
pub use flash::{FlashStorage, async_flash_wrapper};
#[cfg(feature = "storage")]
pub use ram_flash::{RamFlash, RamFlashError};

use crate::eeconfig::KeymapConfig;

/// Persistent storage for settings which survive power cycles.
///
/// Reads return `None` when nothing was saved or the saved data cannot be read.
/// Writes are fire-and-forget, failures are logged by the implementation.
pub trait KeyboardStorage {
    /// Read the saved default layer
    fn read_default_layer(&mut self) -> Option<u8>;

    /// Save the default layer
    fn write_default_layer(&mut self, layer_num: u8);

    /// Read the saved keymap config
    fn read_keymap_config(&mut self) -> Option<KeymapConfig>;

    /// Save the keymap config
    fn write_keymap_config(&mut self, config: KeymapConfig);
}

/// No storage, nothing survives a power cycle
impl KeyboardStorage for () {
    fn read_default_layer(&mut self) -> Option<u8> {
        None
    }

    fn write_default_layer(&mut self, _layer_num: u8) {}

    fn read_keymap_config(&mut self) -> Option<KeymapConfig> {
        None
    }

    fn write_keymap_config(&mut self, _config: KeymapConfig) {}
}

impl<S: KeyboardStorage> KeyboardStorage for &mut S {
    fn read_default_layer(&mut self) -> Option<u8> {
        (**self).read_default_layer()
    }

    fn write_default_layer(&mut self, layer_num: u8) {
        (**self).write_default_layer(layer_num)
    }

    fn read_keymap_config(&mut self) -> Option<KeymapConfig> {
        (**self).read_keymap_config()
    }

    fn write_keymap_config(&mut self, config: KeymapConfig) {
        (**self).write_keymap_config(config)
    }
}
