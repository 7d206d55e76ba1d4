use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Short names of keycodes and actions, all in lowercase.
///
/// The value is either a canonical keycode name, such as `Backspace`, or an action
/// in `keyboard.toml` syntax, such as `S(Kc1)`. Canonical names don't need an alias,
/// they are matched case-insensitively.
pub static KEYCODE_ALIAS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    macro_rules! add_alias {
        ($keycode:tt = $( $alias:expr),*) => {
            $(
                m.insert($alias, $keycode);
            )*
        };
    }

    add_alias!("Kc1" = "1");
    add_alias!("Kc2" = "2");
    add_alias!("Kc3" = "3");
    add_alias!("Kc4" = "4");
    add_alias!("Kc5" = "5");
    add_alias!("Kc6" = "6");
    add_alias!("Kc7" = "7");
    add_alias!("Kc8" = "8");
    add_alias!("Kc9" = "9");
    add_alias!("Kc0" = "0");
    add_alias!("Enter" = "ent", "entr");
    add_alias!("Escape" = "esc");
    add_alias!("Backspace" = "bspc");
    add_alias!("Space" = "spc");
    add_alias!("Minus" = "mins");
    add_alias!("Equal" = "eql");
    add_alias!("LeftBracket" = "left_bracket", "lbrc");
    add_alias!("RightBracket" = "right_bracket", "rbrc");
    add_alias!("Backslash" = "bsls");
    add_alias!("NonusHash" = "nonus_hash", "nuhs");
    add_alias!("Semicolon" = "scln");
    add_alias!("Quote" = "quot");
    add_alias!("Grave" = "grv");
    add_alias!("Comma" = "comm");
    add_alias!("Slash" = "slsh");
    add_alias!("CapsLock" = "caps_lock", "caps");
    add_alias!("PrintScreen" = "print_screen", "pscr");
    add_alias!("ScrollLock" = "scroll_lock", "scrl");
    add_alias!("Pause" = "paus", "brk");
    add_alias!("Insert" = "ins");
    add_alias!("PageUp" = "page_up", "pgup");
    add_alias!("Delete" = "del");
    add_alias!("PageDown" = "page_down", "pgdn");
    add_alias!("Right" = "rght");
    add_alias!("NumLock" = "num_lock", "num");
    add_alias!("KpSlash" = "kp_slash", "psls");
    add_alias!("KpAsterisk" = "kp_asterisk", "past");
    add_alias!("KpMinus" = "kp_minus", "pmns");
    add_alias!("KpPlus" = "kp_plus", "ppls");
    add_alias!("KpEnter" = "kp_enter", "pent");
    add_alias!("Kp1" = "kp_1", "p1");
    add_alias!("Kp2" = "kp_2", "p2");
    add_alias!("Kp3" = "kp_3", "p3");
    add_alias!("Kp4" = "kp_4", "p4");
    add_alias!("Kp5" = "kp_5", "p5");
    add_alias!("Kp6" = "kp_6", "p6");
    add_alias!("Kp7" = "kp_7", "p7");
    add_alias!("Kp8" = "kp_8", "p8");
    add_alias!("Kp9" = "kp_9", "p9");
    add_alias!("Kp0" = "kp_0", "p0");
    add_alias!("KpDot" = "kp_dot", "pdot");
    add_alias!("NonusBackslash" = "nonus_backslash", "nubs");
    add_alias!("Application" = "app");
    add_alias!("KbPower" = "kb_power");
    add_alias!("KpEqual" = "kp_equal", "peql");
    add_alias!("Execute" = "exec");
    add_alias!("Select" = "slct");
    add_alias!("Again" = "agin");
    add_alias!("Paste" = "pste");
    add_alias!("KbMute" = "kb_mute");
    add_alias!("KbVolumeUp" = "kb_volume_up");
    add_alias!("KbVolumeDown" = "kb_volume_down");
    add_alias!("KpComma" = "kp_comma", "pcmm");
    add_alias!("International1" = "international_1", "int1");
    add_alias!("International2" = "international_2", "int2");
    add_alias!("International3" = "international_3", "int3");
    add_alias!("International4" = "international_4", "int4");
    add_alias!("International5" = "international_5", "int5");
    add_alias!("Language1" = "language_1", "lng1");
    add_alias!("Language2" = "language_2", "lng2");
    add_alias!("SystemPower" = "system_power", "pwr");
    add_alias!("SystemSleep" = "system_sleep", "slep");
    add_alias!("SystemWake" = "system_wake", "wake");
    add_alias!("AudioMute" = "audio_mute", "mute");
    add_alias!("AudioVolUp" = "audio_vol_up", "volu");
    add_alias!("AudioVolDown" = "audio_vol_down", "vold");
    add_alias!("MediaNextTrack" = "media_next_track", "mnxt");
    add_alias!("MediaPrevTrack" = "media_prev_track", "mprv");
    add_alias!("MediaStop" = "media_stop", "mstp");
    add_alias!("MediaPlayPause" = "media_play_pause", "mply");
    add_alias!("MediaSelect" = "media_select", "msel");
    add_alias!("MediaEject" = "media_eject", "ejct");
    add_alias!("Calculator" = "calc");
    add_alias!("MyComputer" = "my_computer", "mycm");
    add_alias!("WwwSearch" = "www_search", "wsch");
    add_alias!("WwwHome" = "www_home", "whom");
    add_alias!("WwwBack" = "www_back", "wbak");
    add_alias!("WwwForward" = "www_forward", "wfwd");
    add_alias!("WwwStop" = "www_stop", "wstp");
    add_alias!("WwwRefresh" = "www_refresh", "wref");
    add_alias!("WwwFavorites" = "www_favorites", "wfav");
    add_alias!("MediaFastForward" = "media_fast_forward", "mffd");
    add_alias!("MediaRewind" = "media_rewind", "mrwd");
    add_alias!("BrightnessUp" = "brightness_up", "briu");
    add_alias!("BrightnessDown" = "brightness_down", "brid");
    add_alias!("LCtrl" = "lctl", "lctrl");
    add_alias!("LShift" = "lsft");
    add_alias!("LAlt" = "lopt");
    add_alias!("LGui" = "lcmd", "lwin");
    add_alias!("RCtrl" = "rctl", "rctrl");
    add_alias!("RShift" = "rsft");
    add_alias!("RAlt" = "ropt", "algr");
    add_alias!("RGui" = "rcmd", "rwin");

    // Shifted symbols
    add_alias!("S(Grave)" = "tild", "tilde");
    add_alias!("S(Kc1)" = "exlm", "exclaim");
    add_alias!("S(Kc2)" = "at");
    add_alias!("S(Kc3)" = "hash");
    add_alias!("S(Kc4)" = "dlr", "dollar");
    add_alias!("S(Kc5)" = "perc", "percent");
    add_alias!("S(Kc6)" = "circ", "circumflex");
    add_alias!("S(Kc7)" = "ampr", "ampersand");
    add_alias!("S(Kc8)" = "astr", "asterisk");
    add_alias!("S(Kc9)" = "lprn", "left_paren");
    add_alias!("S(Kc0)" = "rprn", "right_paren");
    add_alias!("S(Minus)" = "unds", "underscore");
    add_alias!("S(Equal)" = "plus");
    add_alias!("S(LeftBracket)" = "lcbr", "left_curly_brace");
    add_alias!("S(RightBracket)" = "rcbr", "right_curly_brace");
    add_alias!("S(Backslash)" = "pipe");
    add_alias!("S(Semicolon)" = "coln", "colon");
    add_alias!("S(Quote)" = "dquo", "dqt", "double_quote");
    add_alias!("S(Comma)" = "labk", "lt", "left_angle_bracket");
    add_alias!("S(Dot)" = "rabk", "gt", "right_angle_bracket");
    add_alias!("S(Slash)" = "ques", "question");

    // Firmware keys
    add_alias!("Bootloader" = "reset", "qk_boot", "boot");
    add_alias!("DebugToggle" = "debug", "db_togg");
    add_alias!("BacklightStep" = "bl_step");
    add_alias!("WM(BacklightStep, RShift)" = "backlit");
    add_alias!("AudioOn" = "au_on");
    add_alias!("AudioOff" = "au_off");
    add_alias!("MusicOn" = "mu_on");
    add_alias!("MusicOff" = "mu_off");
    add_alias!("MusicModeCycle" = "mu_mod");
    add_alias!("MidiOn" = "mi_on");
    add_alias!("MidiOff" = "mi_off");
    add_alias!("VoiceIncrease" = "muv_in");
    add_alias!("VoiceDecrease" = "muv_de");
    add_alias!("TerminalOn" = "term_on");
    add_alias!("TerminalOff" = "term_off");
    add_alias!("SwapAltGui" = "ag_swap");
    add_alias!("UnswapAltGui" = "ag_norm");

    // Tri-layer keys
    add_alias!("TriLayerLower" = "tl_lower", "tl_lowr");
    add_alias!("TriLayerUpper" = "tl_upper", "tl_uppr");

    m
});
