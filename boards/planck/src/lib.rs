//! Planck keymap.
//!
//! Lower and raise are tri-layer keys, holding both reaches adjust. The adjust
//! layer holds the firmware keys, and the persistent qwerty key.
#![cfg_attr(not(test), no_std)]

pub mod controller;
pub mod keymap;

pub use controller::PlanckController;
pub use keymap::{ADJUST, BEHAVIOR, COL, KEYMAP, LOWER, NUM_LAYER, QWERTY, RAISE, ROW};
