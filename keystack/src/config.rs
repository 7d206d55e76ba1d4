//! Runtime configuration of the keyboard.

/// Configurations for actions behavior
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BehaviorConfig {
    pub tri_layer: Option<TriLayerConfig>,
    pub one_shot: OneShotConfig,
}

/// Tri-layer: `adjust` is active exactly when both `lower` and `upper` are active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriLayerConfig {
    pub lower: u8,
    pub upper: u8,
    pub adjust: u8,
}

impl TriLayerConfig {
    pub const fn new(lower: u8, upper: u8, adjust: u8) -> Self {
        Self { lower, upper, adjust }
    }
}

/// Config for one shot behavior
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OneShotConfig {
    /// An armed one shot layer is released when no key is pressed within this time, in milliseconds
    pub timeout_ms: u64,
}

impl Default for OneShotConfig {
    fn default() -> Self {
        Self { timeout_ms: 1000 }
    }
}

/// Config for storage
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StorageConfig {
    /// Start address of local storage, MUST BE start of a sector.
    /// If start_addr is set to 0(this is the default value), the last `num_sectors` sectors will be used.
    pub start_addr: usize,
    /// Number of sectors used for storage, >= 2.
    pub num_sectors: u8,
    /// Clear the storage at boot
    pub clear_storage: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            start_addr: 0,
            num_sectors: 2,
            clear_storage: false,
        }
    }
}
