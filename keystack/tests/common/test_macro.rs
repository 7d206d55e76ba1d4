extern crate keystack;

#[macro_export]
macro_rules! key_sequence_test {
    (keyboard: $keyboard:expr, sequence: [$([$row:expr, $col:expr, $pressed:expr, $delay:expr]),* $(,)?], expected_reports: [$([$modifier:expr, $keys:expr]),* $(,)?]) => {{
        let mut keyboard = $keyboard;
        let sequence = vec![
            $(
                $crate::common::TestKeyPress {
                    row: $row,
                    col: $col,
                    pressed: $pressed,
                    delay: $delay,
                },
            )*
        ];
        let expected_reports: Vec<keystack::hid::KeyboardReport> = vec![
            $(
                keystack::hid::KeyboardReport {
                    modifier: $modifier,
                    keycodes: $keys,
                },
            )*
        ];

        $crate::common::run_key_sequence(&mut keyboard, &sequence);
        assert_eq!(keyboard.reporter().keyboard_reports(), expected_reports);
        keyboard
    }};
}

// a rust macro to map a str to k!(a) as u8
#[macro_export]
macro_rules! kc_to_u8 {
    ($key: ident) => {
        keystack::types::keycode::HidKeyCode::$key as u8
    };
}
