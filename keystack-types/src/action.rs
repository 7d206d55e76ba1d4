//! Keyboard actions.
//!
//! A [`KeyAction`] is what a single position of a layer holds. Layer resolution
//! looks at the `KeyAction` only, the inner [`Action`] decides what happens on
//! press and release.

use crate::keycode::KeyCode;
use crate::modifier::ModifierCombination;

/// A KeyAction is the action at a keyboard position, stored in keymap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// No action, the position produces nothing.
    No,
    /// Transparent action, next active layer will be checked.
    Transparent,
    /// A single action, such as triggering a key, or activating a layer.
    /// Action is triggered when pressed and cancelled when released.
    Single(Action),
}

impl KeyAction {
    pub fn is_transparent(&self) -> bool {
        matches!(self, KeyAction::Transparent)
    }

    /// The layer referenced by this key, if it holds a layer action.
    pub fn layer(&self) -> Option<u8> {
        match self {
            KeyAction::Single(a) => a.layer(),
            _ => None,
        }
    }
}

/// A single basic action that a keyboard can execute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Default action, no action.
    No,
    /// A normal key stroke, uses for all keycodes defined in `KeyCode` enum.
    Key(KeyCode),
    /// Key stroke with modifier combination triggered.
    KeyWithModifier(KeyCode, ModifierCombination),
    /// Modifier combination only.
    Modifier(ModifierCombination),
    /// Activate a layer while the key is held
    LayerOn(u8),
    /// Toggle a layer
    LayerToggle(u8),
    /// Activate a layer and deactivate all other layers(except default layer)
    LayerToggleOnly(u8),
    /// Oneshot layer, keep the layer active until the next key is triggered.
    OneShotLayer(u8),
    /// Set default layer until next power cycle
    DefaultLayer(u8),
    /// Set default layer and save it, the layer survives power cycles
    PersistentDefaultLayer(u8),
    /// Hold the lower layer of the configured tri-layer
    TriLayerLower,
    /// Hold the upper layer of the configured tri-layer
    TriLayerUpper,
}

impl Action {
    /// The layer number carried by a layer action.
    ///
    /// Tri-layer keys carry no number, their layers come from the behavior config.
    pub fn layer(&self) -> Option<u8> {
        match self {
            Action::LayerOn(l)
            | Action::LayerToggle(l)
            | Action::LayerToggleOnly(l)
            | Action::OneShotLayer(l)
            | Action::DefaultLayer(l)
            | Action::PersistentDefaultLayer(l) => Some(*l),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::HidKeyCode;

    #[test]
    fn test_referenced_layer() {
        assert_eq!(KeyAction::Single(Action::LayerOn(3)).layer(), Some(3));
        assert_eq!(KeyAction::Single(Action::PersistentDefaultLayer(0)).layer(), Some(0));
        assert_eq!(KeyAction::Single(Action::TriLayerLower).layer(), None);
        assert_eq!(KeyAction::Single(Action::Key(KeyCode::Hid(HidKeyCode::A))).layer(), None);
        assert_eq!(KeyAction::Transparent.layer(), None);
    }
}
