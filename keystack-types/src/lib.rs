//! # keystack types
//!
//! Value types shared by the keystack crates.
//!
//! - [`action`] - What a key position does: plain output, layer switching, or nothing
//! - [`keycode`] - Keycodes: HID usages, consumer and system control keys, firmware keys
//! - [`modifier`] - Modifier combinations and the HID modifier byte
//!
//! The runtime in `keystack` and the `keyboard.toml` loader in `keystack-config`
//! both produce and consume these types.

#![no_std]

pub mod action;
pub mod keycode;
pub mod modifier;
