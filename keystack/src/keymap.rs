use crate::config::BehaviorConfig;
use crate::event::KeyEvent;
use crate::layer_stack::LayerStack;
use crate::storage::KeyboardStorage;
use crate::types::action::KeyAction;

/// Keymap represents the stack of layers.
///
/// The conception of Keymap is borrowed from qmk: <https://docs.qmk.fm/#/keymap>.
///
/// Keymap should be binded to the actual pcb matrix definition.
/// A key position is `(row, col)`, the action is retrieved from the highest active layer
/// which doesn't hold a transparent action at that position.
pub struct KeyMap<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> {
    /// Layers
    layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
    /// Active layers
    stack: LayerStack<NUM_LAYER>,
    /// Layer on which each pressed key was resolved
    layer_cache: [[Option<u8>; COL]; ROW],
    /// Options for configurable action behavior
    pub(crate) behavior: BehaviorConfig,
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize> KeyMap<'a, ROW, COL, NUM_LAYER> {
    pub fn new(layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER], behavior: BehaviorConfig) -> Self {
        Self::new_with_default_layer(layers, behavior, 0)
    }

    /// Create the keymap with the default layer saved in the storage.
    ///
    /// Layer 0 is used when nothing is saved, or the saved layer doesn't exist in this keymap.
    pub fn new_from_storage<S: KeyboardStorage>(
        layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
        behavior: BehaviorConfig,
        storage: &mut S,
    ) -> Self {
        let default_layer = match storage.read_default_layer() {
            Some(layer) => {
                info!("Loaded default layer {} from storage", layer);
                layer
            }
            None => 0,
        };
        Self::new_with_default_layer(layers, behavior, default_layer)
    }

    fn new_with_default_layer(
        layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
        behavior: BehaviorConfig,
        default_layer: u8,
    ) -> Self {
        assert!(NUM_LAYER > 0, "Keymap must have at least one layer");
        KeyMap {
            layers,
            stack: LayerStack::new(default_layer, behavior.tri_layer),
            layer_cache: [[None; COL]; ROW],
            behavior,
        }
    }

    /// Resolve the action at the given position with the current layer stack.
    ///
    /// Transparent actions fall through to the next active layer, a position which
    /// is transparent on every active layer resolves to `KeyAction::No`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of the keymap.
    pub fn resolve(&self, row: usize, col: usize) -> KeyAction {
        self.resolve_with_layer(row, col)
            .map(|(action, _)| action)
            .unwrap_or(KeyAction::No)
    }

    /// Resolve every position of the keymap
    pub fn resolve_all(&self) -> [[KeyAction; COL]; ROW] {
        let mut resolved = [[KeyAction::No; COL]; ROW];
        for (row, actions) in resolved.iter_mut().enumerate() {
            for (col, action) in actions.iter_mut().enumerate() {
                *action = self.resolve(row, col);
            }
        }
        resolved
    }

    /// The action of a single layer, without resolution
    pub fn action_at(&self, row: usize, col: usize, layer_num: u8) -> Option<KeyAction> {
        check_position::<ROW, COL>(row, col);
        self.layers.get(layer_num as usize).map(|layer| layer[row][col])
    }

    /// Fetch the action in keymap, with layer cache.
    ///
    /// A press resolves the action and saves the layer it was found on, the release of the
    /// same position reads the saved layer, so layer changes between press and release
    /// don't change the released action.
    pub(crate) fn get_action_with_layer_cache(&mut self, key_event: KeyEvent) -> KeyAction {
        let row = key_event.row as usize;
        let col = key_event.col as usize;
        check_position::<ROW, COL>(row, col);
        if !key_event.pressed {
            // Releasing a pressed key, use cached layer and restore the cache
            return match self.layer_cache[row][col].take() {
                Some(layer) => self.layers[layer as usize][row][col],
                None => KeyAction::No,
            };
        }

        match self.resolve_with_layer(row, col) {
            Some((action, layer)) => {
                self.layer_cache[row][col] = Some(layer);
                action
            }
            None => KeyAction::No,
        }
    }

    fn resolve_with_layer(&self, row: usize, col: usize) -> Option<(KeyAction, u8)> {
        check_position::<ROW, COL>(row, col);
        // Iterate from higher layer to lower layer, the lowest checked layer is the default layer
        self.stack.iter().find_map(|layer_num| {
            let action = self.layers[layer_num as usize][row][col];
            (!action.is_transparent()).then_some((action, layer_num))
        })
    }

    pub fn layer_stack(&self) -> &LayerStack<NUM_LAYER> {
        &self.stack
    }

    /// Get the default layer number
    pub fn default_layer(&self) -> u8 {
        self.stack.default_layer()
    }

    /// The layer with the highest priority
    pub fn active_layer(&self) -> u8 {
        self.stack.highest()
    }

    pub fn is_layer_active(&self, layer_num: u8) -> bool {
        self.stack.is_active(layer_num)
    }

    /// Set the default layer number
    pub fn set_default_layer(&mut self, layer_num: u8) {
        self.stack.set_default_layer(layer_num);
    }

    /// Activate given layer
    pub fn activate_layer(&mut self, layer_num: u8) {
        self.stack.activate(layer_num);
    }

    /// Deactivate given layer
    pub fn deactivate_layer(&mut self, layer_num: u8) {
        self.stack.deactivate(layer_num);
    }

    /// Toggle given layer
    pub fn toggle_layer(&mut self, layer_num: u8) {
        self.stack.toggle(layer_num);
    }

    /// Deactivate all layers except the default layer, then activate given layer
    pub fn toggle_only_layer(&mut self, layer_num: u8) {
        self.stack.toggle_only(layer_num);
    }
}

/// A position outside of the matrix means the keymap doesn't match the keyboard
fn check_position<const ROW: usize, const COL: usize>(row: usize, col: usize) {
    if row >= ROW || col >= COL {
        panic!(
            "Key position ({}, {}) is out of the {}x{} keymap",
            row, col, ROW, COL
        );
    }
}
