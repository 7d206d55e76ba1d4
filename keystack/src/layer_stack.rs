use core::iter;

use heapless::Vec;

use crate::config::TriLayerConfig;

/// The runtime layer state: active overlay layers ordered by activation, plus the default layer.
///
/// The last activated overlay has the highest priority. The default layer is always
/// present below every overlay. When a tri-layer is configured, its adjust layer is
/// derived from the lower and upper layers after every change and cannot be
/// switched on or off by itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerStack<const NUM_LAYER: usize> {
    /// Active overlays, lowest priority first
    active: Vec<u8, NUM_LAYER>,
    /// Default layer number
    default_layer: u8,
    tri_layer: Option<TriLayerConfig>,
}

impl<const NUM_LAYER: usize> Default for LayerStack<NUM_LAYER> {
    fn default() -> Self {
        Self::new(0, None)
    }
}

impl<const NUM_LAYER: usize> LayerStack<NUM_LAYER> {
    pub fn new(default_layer: u8, tri_layer: Option<TriLayerConfig>) -> Self {
        let tri_layer = tri_layer.filter(|t| {
            let valid = [t.lower, t.upper, t.adjust]
                .iter()
                .all(|&l| (l as usize) < NUM_LAYER);
            if !valid {
                warn!(
                    "Tri-layer ({}, {}, {}) is out of {} layers, disabled",
                    t.lower, t.upper, t.adjust, NUM_LAYER
                );
            }
            valid
        });
        let default_layer = if (default_layer as usize) < NUM_LAYER {
            default_layer
        } else {
            warn!("Default layer {} is out of {} layers, use layer 0", default_layer, NUM_LAYER);
            0
        };
        Self {
            active: Vec::new(),
            default_layer,
            tri_layer,
        }
    }

    pub fn default_layer(&self) -> u8 {
        self.default_layer
    }

    pub fn tri_layer(&self) -> Option<TriLayerConfig> {
        self.tri_layer
    }

    /// Active overlays, lowest priority first. The default layer is not included.
    pub fn overlays(&self) -> &[u8] {
        &self.active
    }

    /// Whether the layer is an active overlay or the default layer
    pub fn is_active(&self, layer_num: u8) -> bool {
        layer_num == self.default_layer || self.is_overlay_active(layer_num)
    }

    pub fn is_overlay_active(&self, layer_num: u8) -> bool {
        self.active.contains(&layer_num)
    }

    /// The layer with the highest priority
    pub fn highest(&self) -> u8 {
        self.active.last().copied().unwrap_or(self.default_layer)
    }

    /// Layers from the highest priority down to the default layer
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.active
            .iter()
            .rev()
            .copied()
            .chain(iter::once(self.default_layer))
    }

    /// Activate given layer, it becomes the highest priority layer
    pub fn activate(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.remove(layer_num);
        self.push(layer_num);
        self.update_tri_layer();
    }

    /// Deactivate given layer
    pub fn deactivate(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.remove(layer_num);
        self.update_tri_layer();
    }

    /// Toggle given layer
    pub fn toggle(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        if !self.remove(layer_num) {
            self.push(layer_num);
        }
        self.update_tri_layer();
    }

    /// Deactivate all overlays, then activate given layer
    pub fn toggle_only(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.active.clear();
        self.push(layer_num);
        self.update_tri_layer();
    }

    /// Set the default layer number
    pub fn set_default_layer(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.default_layer = layer_num;
    }

    fn check_layer(&self, layer_num: u8) -> bool {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return false;
        }
        true
    }

    fn push(&mut self, layer_num: u8) {
        // Layers are unique and less than NUM_LAYER, so the stack never overflows
        if self.active.push(layer_num).is_err() {
            error!("Layer stack is full, layer {} is dropped", layer_num);
        }
    }

    /// Remove given layer, returns whether it was active
    fn remove(&mut self, layer_num: u8) -> bool {
        match self.active.iter().position(|&l| l == layer_num) {
            Some(idx) => {
                self.active.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Update Tri Layer state
    fn update_tri_layer(&mut self) {
        if let Some(tri_layer) = self.tri_layer {
            let expected = self.is_overlay_active(tri_layer.lower) && self.is_overlay_active(tri_layer.upper);
            let current = self.is_overlay_active(tri_layer.adjust);
            if expected && !current {
                self.push(tri_layer.adjust);
            } else if !expected && current {
                self.remove(tri_layer.adjust);
            }
        }
    }
}
