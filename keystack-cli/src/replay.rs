use anyhow::{Result, bail};
use embassy_futures::block_on;
use keystack::controller::{Controller, ControllerEvent};
use keystack::event::KeyEvent;
use keystack::hid::{HidReporter, Report};
use keystack::keyboard::Keyboard;
use keystack::storage::FlashStorage;

use crate::display::{layer_title, print_grid};
use crate::script::Command;
use crate::{Flash, Keymap, MAX_COL, MAX_LAYER, MAX_ROW};

/// Prints every report
pub(crate) struct PrintReporter;

impl HidReporter for PrintReporter {
    fn send_report(&mut self, report: Report) {
        match report {
            Report::KeyboardReport(r) => {
                println!("  report: modifier {:#04x}, keycodes {:?}", r.modifier, r.keycodes)
            }
            Report::MediaKeyboardReport(r) => println!("  report: media {:#06x}", r.usage_id),
            Report::SystemControlReport(r) => println!("  report: system control {:#04x}", r.usage_id),
        }
    }
}

/// Prints every controller event
pub(crate) struct PrintController;

impl Controller for PrintController {
    fn process_event(&mut self, event: ControllerEvent) {
        println!("  event: {:?}", event);
    }
}

type CliKeyboard<'a> = Keyboard<'a, MAX_ROW, MAX_COL, MAX_LAYER, PrintReporter, PrintController, FlashStorage<Flash>>;

/// A keyboard driven by script commands
pub(crate) struct Replay<'a> {
    keymap: &'a Keymap,
    keyboard: Option<CliKeyboard<'a>>,
    /// Clock of the replay, in milliseconds
    now: u64,
}

impl<'a> Replay<'a> {
    pub(crate) fn new(keymap: &'a Keymap, storage: FlashStorage<Flash>) -> Self {
        Self {
            keymap,
            keyboard: Some(Self::power_on(keymap, storage)),
            now: 0,
        }
    }

    fn power_on(keymap: &'a Keymap, storage: FlashStorage<Flash>) -> CliKeyboard<'a> {
        let keyboard = Keyboard::new(
            &*keymap.layers,
            keymap.behavior,
            PrintReporter,
            PrintController,
            storage,
        );
        println!("power on, default layer: {}", layer_title(&keymap.layout, keyboard.keymap().default_layer()));
        keyboard
    }

    fn power_off(&mut self) -> Flash {
        match self.keyboard.take() {
            Some(keyboard) => {
                let (_, _, storage) = keyboard.into_parts();
                storage.into_inner()
            }
            None => Flash::new(),
        }
    }

    pub(crate) fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Press(row, col) => self.process(KeyEvent::press(row, col, self.now))?,
            Command::Release(row, col) => self.process(KeyEvent::release(row, col, self.now))?,
            Command::Tap(row, col) => {
                self.process(KeyEvent::press(row, col, self.now))?;
                self.process(KeyEvent::release(row, col, self.now))?;
            }
            Command::Wait(ms) => self.now = self.now.saturating_add(ms),
            Command::Reboot => {
                println!("reboot");
                let flash = self.power_off();
                let storage = block_on(FlashStorage::new(flash, &self.keymap.storage));
                self.keyboard = Some(Self::power_on(self.keymap, storage));
                self.now = 0;
            }
            Command::Show => {
                let layout = &self.keymap.layout;
                if let Some(keyboard) = &self.keyboard {
                    let resolved = keyboard.keymap().resolve_all();
                    print_grid(
                        resolved[..layout.rows as usize]
                            .iter()
                            .map(|row| &row[..layout.cols as usize]),
                    );
                }
            }
            Command::Layers => {
                if let Some(keyboard) = &self.keyboard {
                    let stack = keyboard.keymap().layer_stack();
                    let layout = &self.keymap.layout;
                    println!("default: {}", layer_title(layout, stack.default_layer()));
                    for layer in stack.overlays().iter().rev() {
                        println!("active:  {}", layer_title(layout, *layer));
                    }
                }
            }
        }
        Ok(())
    }

    fn process(&mut self, event: KeyEvent) -> Result<()> {
        let layout = &self.keymap.layout;
        if event.row >= layout.rows || event.col >= layout.cols {
            bail!(
                "Key position ({}, {}) is out of the {}x{} keymap",
                event.row,
                event.col,
                layout.rows,
                layout.cols
            );
        }
        println!(
            "{} ({}, {}) at {} ms",
            if event.pressed { "press" } else { "release" },
            event.row,
            event.col,
            event.timestamp
        );
        if let Some(keyboard) = &mut self.keyboard {
            keyboard.process(event);
        }
        Ok(())
    }

    /// Power off and give back the flash
    pub(crate) fn into_flash(mut self) -> Flash {
        self.power_off()
    }
}

#[cfg(test)]
mod tests {
    use keystack_config::KeyboardTomlConfig;

    use super::*;

    const KEYBOARD: &str = r#"
[layout]
rows = 1
cols = 2
layers = 2

[[layer]]
keys = "A OSL(1)"

[[layer]]
keys = "B _"
"#;

    fn keymap() -> Keymap {
        let config = KeyboardTomlConfig::new_from_toml_str(KEYBOARD).unwrap();
        Keymap::new(&config).unwrap()
    }

    fn replay(keymap: &Keymap) -> Replay<'_> {
        let storage = block_on(FlashStorage::new(Flash::new(), &keymap.storage));
        Replay::new(keymap, storage)
    }

    #[test]
    fn test_wait_saturates_the_clock() {
        let keymap = keymap();
        let mut replay = replay(&keymap);
        replay.run(Command::Wait(u64::MAX)).unwrap();
        replay.run(Command::Wait(10)).unwrap();
        assert_eq!(replay.now, u64::MAX);
        replay.run(Command::Tap(0, 0)).unwrap();
    }

    #[test]
    fn test_wait_expires_one_shot_layer() {
        let keymap = keymap();
        let mut replay = replay(&keymap);
        replay.run(Command::Tap(0, 1)).unwrap();
        let active = |replay: &Replay| replay.keyboard.as_ref().map(|k| k.keymap().active_layer());
        assert_eq!(active(&replay), Some(1));

        replay.run(Command::Wait(keymap.behavior.one_shot.timeout_ms + 1)).unwrap();
        replay.run(Command::Press(0, 0)).unwrap();
        assert_eq!(active(&replay), Some(0));
    }

    #[test]
    fn test_position_out_of_layout() {
        let keymap = keymap();
        let mut replay = replay(&keymap);
        assert!(replay.run(Command::Press(1, 0)).is_err());
        assert!(replay.run(Command::Tap(0, 2)).is_err());
    }
}
