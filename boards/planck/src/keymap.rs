use keystack::config::{BehaviorConfig, OneShotConfig, TriLayerConfig};
use keystack::types::action::KeyAction;
use keystack::{a, k, layer, pdf, shifted, sp, tg, tl_lower, tl_upper};

pub const COL: usize = 12;
pub const ROW: usize = 4;
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
        [k!(Tab), k!(Q), k!(W), k!(E), k!(R), k!(T), k!(Y), k!(U), k!(I), k!(O), k!(P), k!(Backspace)],
        [k!(Escape), k!(A), k!(S), k!(D), k!(F), k!(G), k!(H), k!(J), k!(K), k!(L), k!(Semicolon), k!(Quote)],
        [a!(No), k!(Z), k!(X), k!(C), k!(V), k!(B), k!(N), k!(M), k!(Comma), k!(Dot), k!(Slash), k!(Enter)],
        [k!(LCtrl), k!(LGui), tg!(LOWER), k!(LAlt), tl_lower!(), k!(LShift), k!(Space), tl_upper!(), k!(Delete), tg!(RAISE), a!(No), a!(No)]
    ]),
    // Lower
    layer!([
        [shifted!(Grave), shifted!(Kc1), shifted!(Kc9), shifted!(Kc0), shifted!(Minus), shifted!(Kc2), shifted!(Equal), k!(Kc7), k!(Kc8), k!(Kc9), k!(Equal), a!(Transparent)],
        [shifted!(Kc3), shifted!(Kc4), shifted!(LeftBracket), shifted!(RightBracket), shifted!(Backslash), shifted!(Kc5), k!(Minus), k!(Kc4), k!(Kc5), k!(Kc6), shifted!(Kc8), k!(Dot)],
        [shifted!(Kc6), shifted!(Kc7), k!(LeftBracket), k!(RightBracket), k!(Grave), k!(Backslash), k!(Kc0), k!(Kc1), k!(Kc2), k!(Kc3), a!(Transparent), a!(Transparent)],
        [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
    ]),
    // Raise
    layer!([
        [k!(MediaNextTrack), k!(MediaPlayPause), k!(Home), k!(Up), k!(End), k!(PageUp), k!(F1), k!(F2), k!(F3), k!(F4), k!(F5), a!(Transparent)],
        [k!(AudioVolDown), k!(AudioVolUp), k!(Left), k!(Down), k!(Right), k!(PageDown), k!(F6), k!(F7), k!(F8), k!(F9), k!(F10), a!(No)],
        [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(F11), k!(F12), a!(No), a!(Transparent), a!(Transparent)],
        [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
    ]),
    // Adjust, lower + raise
    layer!([
        [a!(Transparent), sp!(Bootloader), sp!(DebugToggle), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), sp!(TerminalOn), sp!(TerminalOff), a!(Transparent), a!(Transparent), k!(Delete)],
        [a!(Transparent), a!(Transparent), sp!(MusicModeCycle), sp!(AudioOn), sp!(AudioOff), sp!(UnswapAltGui), sp!(SwapAltGui), pdf!(QWERTY), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
        [a!(Transparent), sp!(VoiceDecrease), sp!(VoiceIncrease), sp!(MusicOn), sp!(MusicOff), sp!(MidiOn), sp!(MidiOff), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
        [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)]
    ]),
];
