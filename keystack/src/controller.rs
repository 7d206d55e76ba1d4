//! Side effects of the keymap.
//!
//! The keyboard notifies a [`Controller`] about layer changes and firmware keys, the
//! controller drives backlight, audio, bootloader jump and so on. Events are fire-and-forget.

/// Events sent from the keyboard to the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerEvent {
    /// The highest active layer changed
    Layer(u8),
    /// The default layer was changed and saved
    DefaultLayer(u8),
    /// Alt and Gui swap state changed
    AltGuiSwapped(bool),
    BacklightStep,
    /// Jump to the bootloader
    Bootloader,
    DebugToggle,
    Audio(bool),
    Music(bool),
    MusicModeCycle,
    Midi(bool),
    VoiceIncrease,
    VoiceDecrease,
    Terminal(bool),
}

/// The trait for output device controllers, such as backlight and speaker.
pub trait Controller {
    /// Process the received event
    fn process_event(&mut self, event: ControllerEvent);
}

/// Ignore all events
impl Controller for () {
    fn process_event(&mut self, _event: ControllerEvent) {}
}

impl<C: Controller> Controller for &mut C {
    fn process_event(&mut self, event: ControllerEvent) {
        (**self).process_event(event)
    }
}
