/// Create a layer in keymap
#[macro_export]
macro_rules! layer {
    ([$([$($x: expr), +]), +]) => {
        [$([$($x), +]),+]
    };
}

/// Create a normal key. For example, `k!(A)` represents `KeyAction::Single(Action::Key(KeyCode::Hid(HidKeyCode::A)))`
#[macro_export]
macro_rules! k {
    ($k: ident) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::Key(
            $crate::types::keycode::KeyCode::Hid($crate::types::keycode::HidKeyCode::$k),
        ))
    };
}

/// Create a firmware key, such as `sp!(Bootloader)` or `sp!(BacklightStep)`
#[macro_export]
macro_rules! sp {
    ($k: ident) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::Key(
            $crate::types::keycode::KeyCode::Special($crate::types::keycode::SpecialKey::$k),
        ))
    };
}

/// Create a normal key with modifier action, the modifier is a `ModifierCombination` constant.
///
/// `wm!(A, LCTRL)` is ctrl + a, `wm!(sp!(BacklightStep), RSHIFT)` holds right shift while stepping the backlight.
#[macro_export]
macro_rules! wm {
    (sp!($x: ident), $m: ident) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::KeyWithModifier(
            $crate::types::keycode::KeyCode::Special($crate::types::keycode::SpecialKey::$x),
            $crate::types::modifier::ModifierCombination::$m,
        ))
    };
    ($x: ident, $m: ident) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::KeyWithModifier(
            $crate::types::keycode::KeyCode::Hid($crate::types::keycode::HidKeyCode::$x),
            $crate::types::modifier::ModifierCombination::$m,
        ))
    };
}

/// Create a shifted key
#[macro_export]
macro_rules! shifted {
    ($x: ident) => {
        $crate::wm!($x, LSHIFT)
    };
}

/// Create a normal action: `KeyAction`
#[macro_export]
macro_rules! a {
    ($a: ident) => {
        $crate::types::action::KeyAction::$a
    };
}

/// Create a layer activate action. For example, `mo!(1)` activates layer 1.
#[macro_export]
macro_rules! mo {
    ($x: expr) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::LayerOn($x))
    };
}

/// Create an oneshot layer key in keymap
#[macro_export]
macro_rules! osl {
    ($x: expr) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::OneShotLayer($x))
    };
}

/// Create a layer toggle action
#[macro_export]
macro_rules! tg {
    ($x: expr) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::LayerToggle($x))
    };
}

/// Create a layer toggle only action (activate layer `n` and deactivate all other layers), `n` is the layer number
#[macro_export]
macro_rules! to {
    ($x: expr) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::LayerToggleOnly($x))
    };
}

/// create a switch default layer action, `n` is the layer number
#[macro_export]
macro_rules! df {
    ($x: expr) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::DefaultLayer($x))
    };
}

/// Create a switch default layer action which is saved to the storage
#[macro_export]
macro_rules! pdf {
    ($x: expr) => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::PersistentDefaultLayer($x))
    };
}

/// Hold the lower layer of the configured tri-layer
#[macro_export]
macro_rules! tl_lower {
    () => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::TriLayerLower)
    };
}

/// Hold the upper layer of the configured tri-layer
#[macro_export]
macro_rules! tl_upper {
    () => {
        $crate::types::action::KeyAction::Single($crate::types::action::Action::TriLayerUpper)
    };
}
