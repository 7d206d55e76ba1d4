pub mod common;

use keystack::event::KeyEvent;
use keystack::storage::KeyboardStorage;
use keystack::types::action::KeyAction;
use keystack::{k, shifted, sp};
use keystack_planck::{ADJUST, BEHAVIOR, KEYMAP, LOWER, QWERTY, RAISE};

use crate::common::{TestFlash, flash_storage, load_keyboard_toml, planck};

// Matrix positions of the layer keys
const LOWER_KEY: (u8, u8) = (3, 4);
const RAISE_KEY: (u8, u8) = (3, 7);
const TOGGLE_LOWER_KEY: (u8, u8) = (3, 2);
const QWERTY_KEY: (u8, u8) = (1, 7);

#[test]
fn test_keyboard_toml_matches_keymap() {
    let config = load_keyboard_toml();
    let layout = config.get_layout_config().unwrap();
    assert_eq!(layout.to_keymap::<4, 12, 4>().unwrap(), KEYMAP);

    let behavior = config.get_behavior_config(&layout).unwrap();
    assert_eq!(behavior.tri_layer, BEHAVIOR.tri_layer);
}

#[test]
fn test_base_layer_defines_every_position() {
    for row in KEYMAP[QWERTY as usize].iter() {
        assert!(row.iter().all(|action| !action.is_transparent()));
    }
}

#[test]
fn test_q_and_exclaim() {
    let mut keyboard = planck(());
    assert_eq!(keyboard.keymap().resolve(0, 1), k!(Q));

    keyboard.process(KeyEvent::press(LOWER_KEY.0, LOWER_KEY.1, 0));
    assert_eq!(keyboard.keymap().resolve(0, 1), shifted!(Kc1));
    // Transparent on lower
    assert_eq!(keyboard.keymap().resolve(0, 11), k!(Backspace));

    keyboard.process(KeyEvent::release(LOWER_KEY.0, LOWER_KEY.1, 10));
    assert_eq!(keyboard.keymap().resolve(0, 1), k!(Q));
}

#[test]
fn test_lower_and_raise_reach_adjust() {
    let mut keyboard = planck(());
    keyboard.process(KeyEvent::press(LOWER_KEY.0, LOWER_KEY.1, 0));
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    keyboard.process(KeyEvent::press(RAISE_KEY.0, RAISE_KEY.1, 10));
    assert!(keyboard.keymap().is_layer_active(ADJUST));
    assert_eq!(keyboard.keymap().resolve(0, 1), sp!(Bootloader));

    keyboard.process(KeyEvent::release(LOWER_KEY.0, LOWER_KEY.1, 20));
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    assert!(keyboard.keymap().is_layer_active(RAISE));
    assert_eq!(keyboard.keymap().resolve(0, 1), k!(MediaPlayPause));
}

#[test]
fn test_toggled_lower_and_raise_reach_adjust() {
    let mut keyboard = planck(());
    keyboard.process(KeyEvent::press(TOGGLE_LOWER_KEY.0, TOGGLE_LOWER_KEY.1, 0));
    keyboard.process(KeyEvent::release(TOGGLE_LOWER_KEY.0, TOGGLE_LOWER_KEY.1, 10));
    keyboard.process(KeyEvent::press(RAISE_KEY.0, RAISE_KEY.1, 20));
    assert!(keyboard.keymap().is_layer_active(ADJUST));
    keyboard.process(KeyEvent::release(RAISE_KEY.0, RAISE_KEY.1, 30));
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    assert!(keyboard.keymap().is_layer_active(LOWER));
}

#[test]
fn test_adjust_keys_drive_controller() {
    let mut keyboard = planck(());
    keyboard.process(KeyEvent::press(LOWER_KEY.0, LOWER_KEY.1, 0));
    keyboard.process(KeyEvent::press(RAISE_KEY.0, RAISE_KEY.1, 0));
    for (row, col) in [(1, 3), (2, 3), (2, 5), (2, 2), (0, 7)] {
        keyboard.process(KeyEvent::press(row, col, 10));
        keyboard.process(KeyEvent::release(row, col, 20));
    }
    let controller = keyboard.controller();
    assert!(controller.audio);
    assert!(controller.music);
    assert!(controller.midi);
    assert_eq!(controller.voice, 1);
    assert!(controller.terminal);
}

#[test]
fn test_saved_default_layer_is_loaded() {
    let mut storage = flash_storage(TestFlash::new());
    storage.write_default_layer(RAISE);
    let keyboard = planck(storage);
    assert_eq!(keyboard.keymap().default_layer(), RAISE);
    assert_eq!(keyboard.keymap().resolve(0, 1), k!(MediaPlayPause));
    // Raise is transparent at (2, 0), the qwerty layer is not in the stack anymore
    assert_eq!(keyboard.keymap().resolve(2, 0), KeyAction::No);
}

#[test]
fn test_qwerty_key_saves_default_layer() {
    let mut keyboard = planck(flash_storage(TestFlash::new()));
    keyboard.process(KeyEvent::press(LOWER_KEY.0, LOWER_KEY.1, 0));
    keyboard.process(KeyEvent::press(RAISE_KEY.0, RAISE_KEY.1, 0));
    keyboard.process(KeyEvent::press(QWERTY_KEY.0, QWERTY_KEY.1, 10));
    keyboard.process(KeyEvent::release(QWERTY_KEY.0, QWERTY_KEY.1, 20));
    assert_eq!(keyboard.keymap().default_layer(), QWERTY);

    // Power cycle
    let (_, _, storage) = keyboard.into_parts();
    let mut storage = flash_storage(storage.into_inner());
    assert_eq!(storage.read_default_layer(), Some(QWERTY));
    let keyboard = planck(storage);
    assert_eq!(keyboard.keymap().default_layer(), QWERTY);
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    assert_eq!(keyboard.keymap().resolve(0, 1), k!(Q));
}
