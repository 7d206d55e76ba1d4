pub mod common;

use keystack::config::BehaviorConfig;
use keystack::controller::ControllerEvent;
use keystack::event::KeyEvent;
use keystack::keyboard::Keyboard;
use keystack::keymap::KeyMap;
use keystack::{a, k, pdf};

use crate::common::{
    ADJUST, KEYMAP, LOWER, QWERTY, RAISE, RecordingController, RecordingReporter, behavior, create_test_keyboard, tap,
};

#[test]
fn test_tri_layer_sequence() {
    let mut keyboard = create_test_keyboard(());

    // Lower alone
    keyboard.process(KeyEvent::press(1, 0, 0));
    assert!(keyboard.keymap().is_layer_active(LOWER));
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    keyboard.process(KeyEvent::release(1, 0, 10));

    // Raise alone
    keyboard.process(KeyEvent::press(1, 1, 20));
    assert!(keyboard.keymap().is_layer_active(RAISE));
    assert!(!keyboard.keymap().is_layer_active(ADJUST));

    // Both
    keyboard.process(KeyEvent::press(1, 0, 30));
    assert!(keyboard.keymap().is_layer_active(ADJUST));
    assert_eq!(keyboard.keymap().active_layer(), ADJUST);
    assert_eq!(keyboard.keymap().resolve(0, 0), pdf!(QWERTY));
    assert_eq!(keyboard.keymap().resolve(0, 3), a!(No));

    // Release one of them
    keyboard.process(KeyEvent::release(1, 1, 40));
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    assert_eq!(keyboard.keymap().active_layer(), LOWER);
    keyboard.process(KeyEvent::release(1, 0, 50));
    assert_eq!(keyboard.keymap().active_layer(), QWERTY);

    assert_eq!(
        keyboard.controller().events,
        [
            ControllerEvent::Layer(LOWER),
            ControllerEvent::Layer(QWERTY),
            ControllerEvent::Layer(RAISE),
            ControllerEvent::Layer(ADJUST),
            ControllerEvent::Layer(LOWER),
            ControllerEvent::Layer(QWERTY),
        ]
    );
}

#[test]
fn test_tri_layer_with_momentary_and_toggle() {
    let mut keyboard = create_test_keyboard(());
    keyboard.process(KeyEvent::press(1, 2, 0));
    tap(&mut keyboard, 1, 3);
    assert!(keyboard.keymap().is_layer_active(ADJUST));

    keyboard.process(KeyEvent::release(1, 2, 10));
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    assert!(keyboard.keymap().is_layer_active(RAISE));
    assert_eq!(keyboard.keymap().resolve(0, 0), k!(Kc1));
}

#[test]
fn test_adjust_cannot_be_switched_alone() {
    let mut keymap = KeyMap::new(&KEYMAP, behavior());
    keymap.toggle_layer(ADJUST);
    assert!(!keymap.is_layer_active(ADJUST));
    keymap.activate_layer(ADJUST);
    assert!(!keymap.is_layer_active(ADJUST));

    keymap.activate_layer(LOWER);
    keymap.activate_layer(RAISE);
    assert!(keymap.is_layer_active(ADJUST));
    // Toggling adjust off is overridden while both layers are on
    keymap.toggle_layer(ADJUST);
    assert!(keymap.is_layer_active(ADJUST));
    keymap.deactivate_layer(ADJUST);
    assert!(keymap.is_layer_active(ADJUST));

    keymap.deactivate_layer(RAISE);
    assert!(!keymap.is_layer_active(ADJUST));
}

#[test]
fn test_tri_layer_keys_without_config() {
    let mut keyboard = Keyboard::new(
        &KEYMAP,
        BehaviorConfig::default(),
        RecordingReporter::default(),
        RecordingController::default(),
        (),
    );
    keyboard.process(KeyEvent::press(1, 0, 0));
    keyboard.process(KeyEvent::press(1, 1, 0));
    assert_eq!(keyboard.keymap().layer_stack().overlays(), &[] as &[u8]);

    // Without tri-layer, lower and raise are plain layers
    keyboard.process(KeyEvent::press(1, 2, 0));
    tap(&mut keyboard, 1, 3);
    assert!(!keyboard.keymap().is_layer_active(ADJUST));
    assert!(keyboard.controller().events.iter().all(|e| *e != ControllerEvent::Layer(ADJUST)));
}
