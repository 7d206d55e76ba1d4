#![allow(dead_code)]

use std::path::Path;

use embassy_futures::block_on;
use keystack::config::StorageConfig;
use keystack::keyboard::Keyboard;
use keystack::storage::{FlashStorage, KeyboardStorage, RamFlash};
use keystack_config::KeyboardTomlConfig;
use keystack_planck::{BEHAVIOR, COL, KEYMAP, NUM_LAYER, PlanckController, ROW};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub type TestFlash = RamFlash<8192>;

pub type PlanckKeyboard<S> = Keyboard<'static, ROW, COL, NUM_LAYER, (), PlanckController, S>;

pub fn flash_storage(flash: TestFlash) -> FlashStorage<TestFlash> {
    block_on(FlashStorage::new(flash, &StorageConfig::default()))
}

pub fn planck<S: KeyboardStorage>(storage: S) -> PlanckKeyboard<S> {
    Keyboard::new(&KEYMAP, BEHAVIOR, (), PlanckController::default(), storage)
}

pub fn load_keyboard_toml() -> KeyboardTomlConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("keyboard.toml");
    KeyboardTomlConfig::new_from_toml_path(path).unwrap()
}
