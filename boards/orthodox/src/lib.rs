//! Orthodox keymap.
//!
//! The orthodox is a split keyboard, its 3x18 matrix has unused positions between the
//! halves, they hold `No` on every layer. Lower and raise are momentary layers, the
//! tri-layer config turns on adjust when both are active.
#![cfg_attr(not(test), no_std)]

use keystack::config::{BehaviorConfig, OneShotConfig, TriLayerConfig};
use keystack::types::action::KeyAction;
use keystack::{a, k, layer, mo, pdf, shifted, sp, tg};

pub const COL: usize = 18;
pub const ROW: usize = 3;
pub const NUM_LAYER: usize = 4;

pub const QWERTY: u8 = 0;
pub const LOWER: u8 = 1;
pub const RAISE: u8 = 2;
pub const ADJUST: u8 = 3;

pub const BEHAVIOR: BehaviorConfig = BehaviorConfig {
    tri_layer: Some(TriLayerConfig::new(LOWER, RAISE, ADJUST)),
    one_shot: OneShotConfig { timeout_ms: 1000 },
};

#[rustfmt::skip]
pub static KEYMAP: [[[KeyAction; COL]; ROW]; NUM_LAYER] = [
    // Qwerty
    layer!([
        [k!(Tab), k!(Q), k!(W), k!(E), k!(R), k!(T), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), k!(Y), k!(U), k!(I), k!(O), k!(P), k!(Backspace)],
        [k!(Escape), k!(A), k!(S), k!(D), k!(F), k!(G), a!(No), k!(LGui), tg!(LOWER), tg!(RAISE), k!(Delete), a!(No), k!(H), k!(J), k!(K), k!(L), k!(Semicolon), k!(Quote)],
        [a!(No), k!(Z), k!(X), k!(C), k!(V), k!(B), mo!(LOWER), k!(LShift), k!(LCtrl), k!(RAlt), k!(Space), mo!(RAISE), k!(N), k!(M), k!(Comma), k!(Dot), k!(Slash), k!(Enter)]
    ]),
    // Lower
    layer!([
        [shifted!(Grave), shifted!(Kc1), shifted!(Kc2), shifted!(Minus), shifted!(Kc9), shifted!(Kc0), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), shifted!(Equal), k!(Kc7), k!(Kc8), k!(Kc9), k!(Minus), a!(Transparent)],
        [shifted!(Kc3), shifted!(Kc4), shifted!(Kc5), shifted!(Backslash), shifted!(LeftBracket), shifted!(RightBracket), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), k!(Equal), k!(Kc4), k!(Kc5), k!(Kc6), shifted!(Kc8), a!(No)],
        [shifted!(Kc6), shifted!(Kc7), shifted!(Kc8), k!(Backslash), k!(LeftBracket), k!(RightBracket), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(Kc0), k!(Kc1), k!(Kc2), k!(Kc3), a!(Transparent), a!(Transparent)]
    ]),
    // Raise
    layer!([
        [k!(MediaNextTrack), k!(MediaPlayPause), k!(Home), k!(Up), k!(End), k!(PageUp), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), k!(F1), k!(F2), k!(F3), k!(F4), k!(F5), a!(Transparent)],
        [k!(AudioVolDown), k!(AudioVolUp), k!(Left), k!(Down), k!(Right), k!(PageDown), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), k!(F6), k!(F7), k!(F8), k!(F9), k!(F10), a!(No)],
        [a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(F11), k!(F12), a!(No), a!(No), a!(No), a!(Transparent)]
    ]),
    // Adjust, lower + raise
    layer!([
        [a!(Transparent), sp!(Bootloader), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(Delete)],
        [a!(Transparent), a!(Transparent), sp!(MusicModeCycle), sp!(AudioOn), sp!(AudioOff), sp!(UnswapAltGui), a!(No), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), sp!(SwapAltGui), pdf!(QWERTY), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
        [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(AudioMute), k!(AudioVolDown), k!(AudioVolUp), k!(MediaNextTrack), k!(MediaPlayPause)]
    ]),
];
