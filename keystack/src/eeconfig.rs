use bitfield_struct::bitfield;

/// Keymap options which are saved to the storage.
#[bitfield(u16, order = Msb, defmt = cfg(feature = "defmt"))]
#[derive(PartialEq, Eq)]
pub struct KeymapConfig {
    #[bits(1)]
    pub swap_lalt_lgui: bool,
    #[bits(1)]
    pub swap_ralt_rgui: bool,
    #[bits(14)]
    _reserved: u16,
}

impl KeymapConfig {
    /// Swap Alt and Gui on both sides
    pub fn with_alt_gui_swapped(self, swapped: bool) -> Self {
        self.with_swap_lalt_lgui(swapped).with_swap_ralt_rgui(swapped)
    }
}
