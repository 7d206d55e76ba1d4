#![allow(dead_code)]

use std::path::Path;

use embassy_futures::block_on;
use keystack::config::StorageConfig;
use keystack::controller::{Controller, ControllerEvent};
use keystack::hid::{HidReporter, KeyboardReport, Report};
use keystack::keyboard::Keyboard;
use keystack::storage::{FlashStorage, KeyboardStorage, RamFlash};
use keystack_config::KeyboardTomlConfig;
use keystack_orthodox::{BEHAVIOR, COL, KEYMAP, NUM_LAYER, ROW};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Collects keyboard reports
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub reports: Vec<KeyboardReport>,
}

impl HidReporter for RecordingReporter {
    fn send_report(&mut self, report: Report) {
        if let Report::KeyboardReport(r) = report {
            self.reports.push(r);
        }
    }
}

/// Collects all controller events
#[derive(Debug, Default)]
pub struct RecordingController {
    pub events: Vec<ControllerEvent>,
}

impl Controller for RecordingController {
    fn process_event(&mut self, event: ControllerEvent) {
        self.events.push(event);
    }
}

pub type TestFlash = RamFlash<8192>;

pub type OrthodoxKeyboard<S> = Keyboard<'static, ROW, COL, NUM_LAYER, RecordingReporter, RecordingController, S>;

pub fn flash_storage(flash: TestFlash) -> FlashStorage<TestFlash> {
    block_on(FlashStorage::new(flash, &StorageConfig::default()))
}

pub fn orthodox<S: KeyboardStorage>(storage: S) -> OrthodoxKeyboard<S> {
    Keyboard::new(
        &KEYMAP,
        BEHAVIOR,
        RecordingReporter::default(),
        RecordingController::default(),
        storage,
    )
}

pub fn load_keyboard_toml() -> KeyboardTomlConfig {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("keyboard.toml");
    KeyboardTomlConfig::new_from_toml_path(path).unwrap()
}
