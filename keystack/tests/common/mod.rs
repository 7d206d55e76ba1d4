#![allow(dead_code)]

pub mod test_macro;

use embassy_futures::block_on;
use keystack::config::{BehaviorConfig, StorageConfig, TriLayerConfig};
use keystack::controller::{Controller, ControllerEvent};
use keystack::event::KeyEvent;
use keystack::hid::{HidReporter, KeyboardReport, Report};
use keystack::keyboard::Keyboard;
use keystack::storage::{FlashStorage, KeyboardStorage, RamFlash};
use keystack::types::action::KeyAction;
use keystack::{a, k, layer, mo, pdf, shifted, tg, tl_lower, tl_upper, to};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub(crate) const KC_LSHIFT: u8 = 1 << 1;

pub const QWERTY: u8 = 0;
pub const LOWER: u8 = 1;
pub const RAISE: u8 = 2;
pub const ADJUST: u8 = 3;

/// A 2x4 keyboard with qwerty, lower, raise and adjust layers
///
/// Row 0 holds plain keys, row 1 holds the layer keys.
#[rustfmt::skip]
pub static KEYMAP: [[[KeyAction; 4]; 2]; 4] = [
    layer!([
        [k!(Q), k!(W), k!(E), k!(Escape)],
        [tl_lower!(), tl_upper!(), mo!(LOWER), tg!(RAISE)]
    ]),
    layer!([
        [shifted!(Kc1), shifted!(Kc2), a!(Transparent), a!(Transparent)],
        [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
    ]),
    layer!([
        [k!(Kc1), k!(Kc2), k!(Kc3), a!(Transparent)],
        [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
    ]),
    layer!([
        [pdf!(QWERTY), pdf!(RAISE), to!(LOWER), a!(No)],
        [a!(Transparent), a!(Transparent), mo!(9), a!(Transparent)]
    ]),
];

pub const TRI_LAYER: TriLayerConfig = TriLayerConfig::new(LOWER, RAISE, ADJUST);

pub fn behavior() -> BehaviorConfig {
    BehaviorConfig {
        tri_layer: Some(TRI_LAYER),
        ..Default::default()
    }
}

/// Collects all reports sent by the keyboard
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub reports: Vec<Report>,
}

impl RecordingReporter {
    pub fn keyboard_reports(&self) -> Vec<KeyboardReport> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                Report::KeyboardReport(r) => Some(*r),
                _ => None,
            })
            .collect()
    }
}

impl HidReporter for RecordingReporter {
    fn send_report(&mut self, report: Report) {
        self.reports.push(report);
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

pub fn flash_storage(flash: TestFlash) -> FlashStorage<TestFlash> {
    block_on(FlashStorage::new(flash, &StorageConfig::default()))
}

pub type TestKeyboard<S> = Keyboard<'static, 2, 4, 4, RecordingReporter, RecordingController, S>;

pub fn create_test_keyboard<S: KeyboardStorage>(storage: S) -> TestKeyboard<S> {
    Keyboard::new(
        &KEYMAP,
        behavior(),
        RecordingReporter::default(),
        RecordingController::default(),
        storage,
    )
}

#[derive(Debug, Clone)]
pub struct TestKeyPress {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    pub delay: u64, // Delay before this key event in milliseconds
}

/// Feed the key sequence to the keyboard, the timestamp of each event is the sum of all delays so far
pub fn run_key_sequence<R: HidReporter, C: Controller, S: KeyboardStorage, const ROW: usize, const COL: usize, const NUM_LAYER: usize>(
    keyboard: &mut Keyboard<'_, ROW, COL, NUM_LAYER, R, C, S>,
    key_sequence: &[TestKeyPress],
) {
    let mut now = 0;
    for key in key_sequence {
        now += key.delay;
        keyboard.process(KeyEvent {
            row: key.row,
            col: key.col,
            pressed: key.pressed,
            timestamp: now,
        });
    }
}

/// Tap a key, press and release it at the same timestamp
pub fn tap<R: HidReporter, C: Controller, S: KeyboardStorage, const ROW: usize, const COL: usize, const NUM_LAYER: usize>(
    keyboard: &mut Keyboard<'_, ROW, COL, NUM_LAYER, R, C, S>,
    row: u8,
    col: u8,
) {
    keyboard.process(KeyEvent::press(row, col, 0));
    keyboard.process(KeyEvent::release(row, col, 0));
}
