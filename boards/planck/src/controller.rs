use keystack::controller::{Controller, ControllerEvent};

/// Number of backlight levels, level 0 is off
pub const BACKLIGHT_LEVELS: u8 = 4;

/// State of the board peripherals driven by the keymap.
///
/// Only the state is tracked here, the actual backlight and speaker drivers read it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlanckController {
    pub backlight_level: u8,
    pub audio: bool,
    pub music: bool,
    pub music_mode: u8,
    pub midi: bool,
    pub voice: u8,
    pub terminal: bool,
    pub debug: bool,
    /// Number of times the default layer song was played
    pub songs_played: u32,
}

impl Controller for PlanckController {
    fn process_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::BacklightStep => {
                self.backlight_level = (self.backlight_level + 1) % BACKLIGHT_LEVELS;
                log::info!("Backlight level {}", self.backlight_level);
            }
            ControllerEvent::DefaultLayer(layer) => {
                if self.audio {
                    self.songs_played += 1;
                }
                log::info!("Default layer {} saved", layer);
            }
            ControllerEvent::Audio(on) => self.audio = on,
            ControllerEvent::Music(on) => self.music = on,
            ControllerEvent::MusicModeCycle => self.music_mode = self.music_mode.wrapping_add(1) % 4,
            ControllerEvent::Midi(on) => self.midi = on,
            ControllerEvent::VoiceIncrease => self.voice = self.voice.saturating_add(1),
            ControllerEvent::VoiceDecrease => self.voice = self.voice.saturating_sub(1),
            ControllerEvent::Terminal(on) => self.terminal = on,
            ControllerEvent::DebugToggle => self.debug = !self.debug,
            ControllerEvent::Bootloader => log::warn!("Jumping to bootloader"),
            ControllerEvent::Layer(_) | ControllerEvent::AltGuiSwapped(_) => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backlight_step_wraps() {
        let mut controller = PlanckController::default();
        for _ in 0..BACKLIGHT_LEVELS {
            controller.process_event(ControllerEvent::BacklightStep);
        }
        assert_eq!(controller.backlight_level, 0);
    }

    #[test]
    fn test_song_needs_audio() {
        let mut controller = PlanckController::default();
        controller.process_event(ControllerEvent::DefaultLayer(0));
        assert_eq!(controller.songs_played, 0);
        controller.process_event(ControllerEvent::Audio(true));
        controller.process_event(ControllerEvent::DefaultLayer(0));
        assert_eq!(controller.songs_played, 1);
    }
}
