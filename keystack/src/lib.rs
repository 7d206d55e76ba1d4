//! Layer-stack keycode resolution for keyboard firmware.
//!
//! A [`KeyMap`](keymap::KeyMap) holds the layers of a keyboard and the stack of active
//! layers, it resolves a key position to the action of the highest active layer.
//! A [`Keyboard`](keyboard::Keyboard) processes key events with the keymap: layer keys
//! change the layer stack, other keys become hid reports and controller events.
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub use keystack_types as types;

pub mod config;
pub mod controller;
pub mod eeconfig;
pub mod event;
pub mod hid;
pub mod keyboard;
pub mod keymap;
pub mod layer_stack;
pub mod layout_macro;
pub mod storage;

pub use keyboard::Keyboard;
pub use keymap::KeyMap;
