use crate::config::BehaviorConfig;
use crate::controller::{Controller, ControllerEvent};
use crate::eeconfig::KeymapConfig;
use crate::event::KeyEvent;
use crate::hid::{HidReporter, KeyboardReport, MediaKeyboardReport, Report, SystemControlReport};
use crate::keymap::KeyMap;
use crate::storage::KeyboardStorage;
use crate::types::action::{Action, KeyAction};
use crate::types::keycode::{ConsumerKey, HidKeyCode, KeyCode, SpecialKey, SystemControlKey};
use crate::types::modifier::{HidModifiers, ModifierCombination};

/// State machine for one shot keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum OneShotState<T> {
    /// First one shot key press
    Initial(T),
    /// One shot key was released before any other key, normal one shot behavior
    Single(T),
    /// Another key was pressed before one shot key was released, treat as a normal layer
    Held(T),
    /// One shot inactive
    #[default]
    None,
}

impl<T> OneShotState<T> {
    /// Get the current one shot value if any
    fn value(&self) -> Option<&T> {
        match self {
            OneShotState::Initial(v) | OneShotState::Single(v) | OneShotState::Held(v) => Some(v),
            OneShotState::None => None,
        }
    }
}

/// Keyboard processes key events: it updates the layer stack and emits hid reports
/// and controller events.
pub struct Keyboard<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, R, C, S>
where
    R: HidReporter,
    C: Controller,
    S: KeyboardStorage,
{
    /// Keymap
    keymap: KeyMap<'a, ROW, COL, NUM_LAYER>,

    /// Receiver of hid reports
    reporter: R,

    /// Receiver of side effects
    controller: C,

    /// Persistent settings
    storage: S,

    /// Keymap options which survive power cycles
    keymap_config: KeymapConfig,

    /// One shot layer state
    osl_state: OneShotState<u8>,

    /// Timestamp when the one shot layer was armed
    osl_armed_at: u64,

    /// The modifiers coming from (last) Action::KeyWithModifier
    with_modifiers: HidModifiers,

    /// The held modifiers for the keyboard hid report
    held_modifiers: HidModifiers,

    /// The held keys for the keyboard hid report, except the modifiers
    held_keycodes: [HidKeyCode; 6],

    /// Registered key position
    registered_keys: [Option<(u8, u8)>; 6],

    /// Last reported highest layer
    last_layer: u8,
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, R, C, S> Keyboard<'a, ROW, COL, NUM_LAYER, R, C, S>
where
    R: HidReporter,
    C: Controller,
    S: KeyboardStorage,
{
    /// Create the keyboard, the saved default layer and keymap options are loaded from the storage.
    pub fn new(
        layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
        behavior: BehaviorConfig,
        reporter: R,
        controller: C,
        mut storage: S,
    ) -> Self {
        let keymap = KeyMap::new_from_storage(layers, behavior, &mut storage);
        let keymap_config = storage.read_keymap_config().unwrap_or_default();
        let last_layer = keymap.active_layer();
        Keyboard {
            keymap,
            reporter,
            controller,
            storage,
            keymap_config,
            osl_state: OneShotState::default(),
            osl_armed_at: 0,
            with_modifiers: HidModifiers::default(),
            held_modifiers: HidModifiers::default(),
            held_keycodes: [HidKeyCode::No; 6],
            registered_keys: [None; 6],
            last_layer,
        }
    }

    pub fn keymap(&self) -> &KeyMap<'a, ROW, COL, NUM_LAYER> {
        &self.keymap
    }

    pub fn keymap_config(&self) -> KeymapConfig {
        self.keymap_config
    }

    pub fn reporter(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn controller(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Tear down the keyboard, e.g. to reuse the storage after a simulated power cycle
    pub fn into_parts(self) -> (R, C, S) {
        (self.reporter, self.controller, self.storage)
    }

    /// Process key changes at (row, col)
    ///
    /// # Panics
    ///
    /// Panics if the position of the event is out of the keymap.
    pub fn process(&mut self, key_event: KeyEvent) {
        self.check_osl_timeout(key_event.timestamp);

        let key_action = self.keymap.get_action_with_layer_cache(key_event);
        debug!("Process key action: {:?}, {:?}", key_action, key_event);
        match key_action {
            KeyAction::No | KeyAction::Transparent => (),
            KeyAction::Single(a) => self.process_key_action_normal(a, key_event),
        }

        // Any key other than a one shot layer key uses up the one shot layer
        if !matches!(key_action, KeyAction::Single(Action::OneShotLayer(_))) {
            self.update_osl(key_event);
        }

        self.notify_layer_change();
    }

    fn process_key_action_normal(&mut self, action: Action, key_event: KeyEvent) {
        match action {
            Action::No => (),
            Action::Key(key) => self.process_action_key(key, key_event),
            Action::KeyWithModifier(key, modifiers) => self.process_action_with_modifier(key, modifiers, key_event),
            Action::Modifier(modifiers) => {
                if key_event.pressed {
                    self.held_modifiers |= modifiers.to_hid_modifiers();
                } else {
                    self.held_modifiers = self.held_modifiers & !modifiers.to_hid_modifiers();
                }
                //report the modifier press/release in its own hid report
                self.send_keyboard_report();
            }
            Action::LayerOn(layer_num) => self.process_action_layer_switch(layer_num, key_event),
            Action::LayerToggle(layer_num) => {
                if key_event.pressed {
                    self.keymap.toggle_layer(layer_num);
                }
            }
            Action::LayerToggleOnly(layer_num) => {
                // Activate a layer and deactivate all other layers(except default layer)
                if key_event.pressed {
                    self.keymap.toggle_only_layer(layer_num);
                }
            }
            Action::OneShotLayer(layer_num) => self.process_action_osl(layer_num, key_event),
            Action::DefaultLayer(layer_num) => {
                if key_event.pressed {
                    self.keymap.set_default_layer(layer_num);
                }
            }
            Action::PersistentDefaultLayer(layer_num) => {
                if key_event.pressed {
                    self.process_action_persistent_default_layer(layer_num);
                }
            }
            Action::TriLayerLower | Action::TriLayerUpper => match self.keymap.behavior.tri_layer {
                Some(tri_layer) => {
                    let layer_num = if action == Action::TriLayerLower {
                        tri_layer.lower
                    } else {
                        tri_layer.upper
                    };
                    self.process_action_layer_switch(layer_num, key_event);
                }
                None => warn!("Tri-layer key {:?} is used, but tri-layer is not configured", action),
            },
        }
    }

    /// Process layer switch action.
    fn process_action_layer_switch(&mut self, layer_num: u8, key_event: KeyEvent) {
        // Change layer state only when the key's state is changed
        if key_event.pressed {
            self.keymap.activate_layer(layer_num);
        } else {
            self.keymap.deactivate_layer(layer_num);
        }
    }

    fn process_action_persistent_default_layer(&mut self, layer_num: u8) {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return;
        }
        info!("Set default layer to {}", layer_num);
        self.keymap.set_default_layer(layer_num);
        self.storage.write_default_layer(layer_num);
        self.controller.process_event(ControllerEvent::DefaultLayer(layer_num));
    }

    fn process_action_osl(&mut self, layer_num: u8, key_event: KeyEvent) {
        // An undefined layer leaves both the one shot state and the layer stack untouched
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return;
        }

        if key_event.pressed {
            // Deactivate old layer if any
            if let Some(&l) = self.osl_state.value() {
                self.keymap.deactivate_layer(l);
            }

            // Update layer of one shot
            self.osl_state = match self.osl_state {
                OneShotState::None | OneShotState::Initial(_) => OneShotState::Initial(layer_num),
                OneShotState::Single(_) => OneShotState::Single(layer_num),
                OneShotState::Held(_) => OneShotState::Held(layer_num),
            };

            // Activate new layer
            self.keymap.activate_layer(layer_num);
        } else {
            match self.osl_state {
                OneShotState::Initial(l) | OneShotState::Single(l) => {
                    // Released before any other key, keep the layer for the next key
                    self.osl_state = OneShotState::Single(l);
                    self.osl_armed_at = key_event.timestamp;
                }
                OneShotState::Held(l) => {
                    self.osl_state = OneShotState::None;
                    self.keymap.deactivate_layer(l);
                }
                OneShotState::None => (),
            }
        }
    }

    fn update_osl(&mut self, key_event: KeyEvent) {
        match self.osl_state {
            OneShotState::Initial(l) => self.osl_state = OneShotState::Held(l),
            OneShotState::Single(layer_num) => {
                if !key_event.pressed {
                    self.keymap.deactivate_layer(layer_num);
                    self.osl_state = OneShotState::None;
                }
            }
            _ => (),
        }
    }

    /// An armed one shot layer is released if no key comes within the timeout
    fn check_osl_timeout(&mut self, now: u64) {
        if let OneShotState::Single(layer_num) = self.osl_state {
            if now.saturating_sub(self.osl_armed_at) > self.keymap.behavior.one_shot.timeout_ms {
                debug!("One shot layer {} timeout", layer_num);
                self.keymap.deactivate_layer(layer_num);
                self.osl_state = OneShotState::None;
            }
        }
    }

    fn process_action_with_modifier(&mut self, key: KeyCode, modifiers: ModifierCombination, key_event: KeyEvent) {
        if key_event.pressed {
            // These modifiers will be combined into the hid report, so
            // they will be "pressed" the same time as the key (in same hid report)
            self.with_modifiers |= modifiers.to_hid_modifiers();
        } else {
            self.with_modifiers = self.with_modifiers & !modifiers.to_hid_modifiers();
        }
        self.process_action_key(key, key_event);

        // Keys outside the keyboard page don't send keyboard reports by themselves
        if !matches!(key, KeyCode::Hid(k) if is_keyboard_page(k)) {
            self.send_keyboard_report();
        }
    }

    fn process_action_key(&mut self, key: KeyCode, key_event: KeyEvent) {
        match key {
            KeyCode::Hid(k) => {
                if let Some(consumer) = k.process_as_consumer() {
                    self.process_action_consumer_control(consumer, key_event);
                } else if let Some(system) = k.process_as_system_control() {
                    self.process_action_system_control(system, key_event);
                } else {
                    self.process_basic(k, key_event);
                }
            }
            KeyCode::Consumer(consumer) => self.process_action_consumer_control(consumer, key_event),
            KeyCode::SystemControl(system) => self.process_action_system_control(system, key_event),
            KeyCode::Special(special) => self.process_special(special, key_event),
        }
    }

    // process a basic keypress/release
    fn process_basic(&mut self, key: HidKeyCode, key_event: KeyEvent) {
        if key.is_modifier() {
            let modifiers = key.to_modifier_combination().to_hid_modifiers();
            if key_event.pressed {
                self.held_modifiers |= modifiers;
            } else {
                self.held_modifiers = self.held_modifiers & !modifiers;
            }
        } else if key != HidKeyCode::No {
            if key_event.pressed {
                self.register_keycode(key, key_event);
            } else {
                self.unregister_keycode(key, key_event);
            }
        }

        self.send_keyboard_report();
    }

    /// Process consumer control action. Consumer control keys are keys in hid consumer page, such as media keys.
    fn process_action_consumer_control(&mut self, key: ConsumerKey, key_event: KeyEvent) {
        let usage_id = if key_event.pressed { key as u16 } else { 0 };
        self.reporter
            .send_report(Report::MediaKeyboardReport(MediaKeyboardReport { usage_id }));
    }

    /// Process system control action. System control keys are keys in system page, such as power key.
    fn process_action_system_control(&mut self, key: SystemControlKey, key_event: KeyEvent) {
        let usage_id = if key_event.pressed { key as u8 } else { 0 };
        self.reporter
            .send_report(Report::SystemControlReport(SystemControlReport { usage_id }));
    }

    /// Firmware keys are forwarded to the controller
    fn process_special(&mut self, key: SpecialKey, key_event: KeyEvent) {
        // Jump to bootloader when the key is released
        if key == SpecialKey::Bootloader {
            if !key_event.pressed {
                self.controller.process_event(ControllerEvent::Bootloader);
            }
            return;
        }
        if !key_event.pressed {
            return;
        }

        let event = match key {
            SpecialKey::DebugToggle => ControllerEvent::DebugToggle,
            SpecialKey::BacklightStep => ControllerEvent::BacklightStep,
            SpecialKey::AudioOn => ControllerEvent::Audio(true),
            SpecialKey::AudioOff => ControllerEvent::Audio(false),
            SpecialKey::MusicOn => ControllerEvent::Music(true),
            SpecialKey::MusicOff => ControllerEvent::Music(false),
            SpecialKey::MusicModeCycle => ControllerEvent::MusicModeCycle,
            SpecialKey::MidiOn => ControllerEvent::Midi(true),
            SpecialKey::MidiOff => ControllerEvent::Midi(false),
            SpecialKey::VoiceIncrease => ControllerEvent::VoiceIncrease,
            SpecialKey::VoiceDecrease => ControllerEvent::VoiceDecrease,
            SpecialKey::TerminalOn => ControllerEvent::Terminal(true),
            SpecialKey::TerminalOff => ControllerEvent::Terminal(false),
            SpecialKey::SwapAltGui => return self.set_alt_gui_swapped(true),
            SpecialKey::UnswapAltGui => return self.set_alt_gui_swapped(false),
            SpecialKey::Bootloader => return,
        };
        self.controller.process_event(event);
    }

    fn set_alt_gui_swapped(&mut self, swapped: bool) {
        let config = self.keymap_config.with_alt_gui_swapped(swapped);
        if config != self.keymap_config {
            self.keymap_config = config;
            self.storage.write_keymap_config(config);
        }
        self.controller.process_event(ControllerEvent::AltGuiSwapped(swapped));
    }

    /// Calculates the combined effect of all modifiers, with alt and gui swapped if configured
    fn resolve_modifiers(&self) -> HidModifiers {
        (self.held_modifiers | self.with_modifiers).swap_alt_gui(
            self.keymap_config.swap_lalt_lgui(),
            self.keymap_config.swap_ralt_rgui(),
        )
    }

    fn send_keyboard_report(&mut self) {
        let report = KeyboardReport {
            modifier: self.resolve_modifiers().into_bits(),
            keycodes: self.held_keycodes.map(|k| k as u8),
        };
        self.reporter.send_report(Report::KeyboardReport(report));
    }

    /// Register a key to be sent in hid report.
    fn register_keycode(&mut self, key: HidKeyCode, key_event: KeyEvent) {
        // First, find the key event slot according to the position
        let slot = self.find_registered_slot(key_event);

        // If the slot is found, update the key in the slot
        if let Some(index) = slot {
            self.held_keycodes[index] = key;
        } else if let Some(index) = self.held_keycodes.iter().position(|&k| k == HidKeyCode::No) {
            // Otherwise, find the first free slot
            self.held_keycodes[index] = key;
            self.registered_keys[index] = Some((key_event.row, key_event.col));
        } else {
            warn!("Too many keys pressed, {:?} is dropped", key);
        }
    }

    /// Unregister a key from hid report.
    fn unregister_keycode(&mut self, key: HidKeyCode, key_event: KeyEvent) {
        let slot = self
            .find_registered_slot(key_event)
            // Otherwise, release the first same key
            .or_else(|| self.held_keycodes.iter().position(|&k| k == key));

        if let Some(index) = slot {
            self.held_keycodes[index] = HidKeyCode::No;
            self.registered_keys[index] = None;
        }
    }

    fn find_registered_slot(&self, key_event: KeyEvent) -> Option<usize> {
        self.registered_keys
            .iter()
            .position(|k| *k == Some((key_event.row, key_event.col)))
    }

    fn notify_layer_change(&mut self) {
        let layer = self.keymap.active_layer();
        if layer != self.last_layer {
            self.last_layer = layer;
            self.controller.process_event(ControllerEvent::Layer(layer));
        }
    }
}

/// Whether the keycode is sent in the keyboard report
fn is_keyboard_page(key: HidKeyCode) -> bool {
    key.process_as_consumer().is_none() && key.process_as_system_control().is_none()
}
