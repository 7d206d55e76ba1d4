use core::ops::Range;

use byteorder::{BigEndian, ByteOrder};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_futures::block_on;
use embedded_storage::nor_flash::NorFlash;
use embedded_storage_async::nor_flash::NorFlash as AsyncNorFlash;
use sequential_storage::Error as SSError;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{SerializationError, Value, fetch_item, store_item};

use super::KeyboardStorage;
use crate::config::StorageConfig;
use crate::eeconfig::KeymapConfig;

/// StorageKeys is the prefix byte of every stored item, it identifies the type of the stored data.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StorageKeys {
    StorageConfig,
    LayoutConfig,
    KeymapConfig,
}

impl StorageKeys {
    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKeys::StorageConfig),
            1 => Some(StorageKeys::LayoutConfig),
            2 => Some(StorageKeys::KeymapConfig),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct LocalStorageConfig {
    enable: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) struct LayoutConfig {
    default_layer: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum StorageData {
    StorageConfig(LocalStorageConfig),
    LayoutConfig(LayoutConfig),
    KeymapConfig(KeymapConfig),
}

impl StorageData {
    fn key(&self) -> u32 {
        match self {
            StorageData::StorageConfig(_) => StorageKeys::StorageConfig as u32,
            StorageData::LayoutConfig(_) => StorageKeys::LayoutConfig as u32,
            StorageData::KeymapConfig(_) => StorageKeys::KeymapConfig as u32,
        }
    }
}

impl Value<'_> for StorageData {
    fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
        if buffer.len() < 3 {
            return Err(SerializationError::BufferTooSmall);
        }
        match self {
            StorageData::StorageConfig(c) => {
                buffer[0] = StorageKeys::StorageConfig as u8;
                // If enabled, write 0 to flash.
                buffer[1] = if c.enable { 0 } else { 1 };
                Ok(2)
            }
            StorageData::LayoutConfig(c) => {
                buffer[0] = StorageKeys::LayoutConfig as u8;
                buffer[1] = c.default_layer;
                Ok(2)
            }
            StorageData::KeymapConfig(c) => {
                buffer[0] = StorageKeys::KeymapConfig as u8;
                BigEndian::write_u16(&mut buffer[1..3], c.into_bits());
                Ok(3)
            }
        }
    }

    fn deserialize_from(buffer: &[u8]) -> Result<Self, SerializationError>
    where
        Self: Sized,
    {
        if buffer.is_empty() {
            return Err(SerializationError::InvalidFormat);
        }
        let key = StorageKeys::from_u8(buffer[0]).ok_or(SerializationError::InvalidFormat)?;
        match key {
            StorageKeys::StorageConfig => {
                if buffer.len() < 2 {
                    return Err(SerializationError::BufferTooSmall);
                }
                // 1 is the initial state of flash, so it means storage is NOT initialized
                Ok(StorageData::StorageConfig(LocalStorageConfig { enable: buffer[1] == 0 }))
            }
            StorageKeys::LayoutConfig => {
                if buffer.len() < 2 {
                    return Err(SerializationError::BufferTooSmall);
                }
                Ok(StorageData::LayoutConfig(LayoutConfig {
                    default_layer: buffer[1],
                }))
            }
            StorageKeys::KeymapConfig => {
                if buffer.len() < 3 {
                    return Err(SerializationError::BufferTooSmall);
                }
                Ok(StorageData::KeymapConfig(KeymapConfig::from_bits(BigEndian::read_u16(
                    &buffer[1..3],
                ))))
            }
        }
    }
}

/// Wrap a blocking flash into an async one
pub fn async_flash_wrapper<F: NorFlash>(flash: F) -> BlockingAsync<F> {
    embassy_embedded_hal::adapter::BlockingAsync::new(flash)
}

/// According to doc of `sequential-storage`, for some flashes the buffer should be aligned in 32 bytes
const BUFFER_SIZE: usize = 32;

/// Storage of the default layer and keymap config in a range of a NOR flash.
///
/// Items are kept in a `sequential-storage` map, keyed by [`StorageKeys`].
/// The storage is used from the synchronous key processing, every access drives
/// the async flash operation to completion in place.
pub struct FlashStorage<F: AsyncNorFlash> {
    pub(crate) flash: F,
    pub(crate) storage_range: Range<u32>,
    buffer: [u8; BUFFER_SIZE],
}

impl<F: AsyncNorFlash> FlashStorage<F> {
    pub async fn new(flash: F, config: &StorageConfig) -> Self {
        // Check storage setting
        assert!(
            config.num_sectors >= 2,
            "Number of used sector for storage must larger than 1"
        );

        info!(
            "Flash capacity {} KB, keystack use {} KB({} sectors) starting from 0x{:X} as storage",
            flash.capacity() / 1024,
            (F::ERASE_SIZE * config.num_sectors as usize) / 1024,
            config.num_sectors,
            config.start_addr,
        );

        // If config.start_addr == 0, use last `num_sectors` sectors
        let storage_range = if config.start_addr == 0 {
            (flash.capacity() - config.num_sectors as usize * F::ERASE_SIZE) as u32..flash.capacity() as u32
        } else {
            assert!(
                config.start_addr % F::ERASE_SIZE == 0,
                "Storage's start addr MUST BE a multiplier of sector size"
            );
            config.start_addr as u32..(config.start_addr + config.num_sectors as usize * F::ERASE_SIZE) as u32
        };

        let mut storage = Self {
            flash,
            storage_range,
            buffer: [0; BUFFER_SIZE],
        };

        if !storage.check_enable().await || config.clear_storage {
            debug!("Clearing storage!");
            let _ = sequential_storage::erase_all(&mut storage.flash, storage.storage_range.clone()).await;
            if let Err(e) = storage
                .write(&StorageData::StorageConfig(LocalStorageConfig { enable: true }))
                .await
            {
                print_storage_error::<F>(e);
            }
        }

        storage
    }

    /// Give the flash back, e.g. to save its content
    pub fn into_inner(self) -> F {
        self.flash
    }

    async fn check_enable(&mut self) -> bool {
        matches!(
            self.read(StorageKeys::StorageConfig).await,
            Ok(Some(StorageData::StorageConfig(LocalStorageConfig { enable: true })))
        )
    }

    async fn read(&mut self, key: StorageKeys) -> Result<Option<StorageData>, SSError<F::Error>> {
        fetch_item::<u32, StorageData, _>(
            &mut self.flash,
            self.storage_range.clone(),
            &mut NoCache::new(),
            &mut self.buffer,
            &(key as u32),
        )
        .await
    }

    async fn write(&mut self, data: &StorageData) -> Result<(), SSError<F::Error>> {
        store_item::<u32, StorageData, _>(
            &mut self.flash,
            self.storage_range.clone(),
            &mut NoCache::new(),
            &mut self.buffer,
            &data.key(),
            data,
        )
        .await
    }

    fn read_blocking(&mut self, key: StorageKeys) -> Option<StorageData> {
        match block_on(self.read(key)) {
            Ok(data) => data,
            Err(e) => {
                print_storage_error::<F>(e);
                None
            }
        }
    }

    fn write_blocking(&mut self, data: StorageData) {
        debug!("Saving {:?}", data);
        if let Err(e) = block_on(self.write(&data)) {
            print_storage_error::<F>(e);
        }
    }
}

impl<F: AsyncNorFlash> KeyboardStorage for FlashStorage<F> {
    fn read_default_layer(&mut self) -> Option<u8> {
        match self.read_blocking(StorageKeys::LayoutConfig)? {
            StorageData::LayoutConfig(c) => Some(c.default_layer),
            _ => None,
        }
    }

    fn write_default_layer(&mut self, layer_num: u8) {
        self.write_blocking(StorageData::LayoutConfig(LayoutConfig {
            default_layer: layer_num,
        }));
    }

    fn read_keymap_config(&mut self) -> Option<KeymapConfig> {
        match self.read_blocking(StorageKeys::KeymapConfig)? {
            StorageData::KeymapConfig(c) => Some(c),
            _ => None,
        }
    }

    fn write_keymap_config(&mut self, config: KeymapConfig) {
        self.write_blocking(StorageData::KeymapConfig(config));
    }
}

fn print_storage_error<F: AsyncNorFlash>(e: SSError<F::Error>) {
    match e {
        #[cfg(feature = "defmt")]
        SSError::Storage { value: e, .. } => error!("Flash error: {:?}", defmt::Debug2Format(&e)),
        #[cfg(not(feature = "defmt"))]
        SSError::Storage { .. } => error!("Flash error"),
        SSError::FullStorage => error!("Storage is full"),
        SSError::Corrupted { .. } => error!("Storage is corrupted"),
        SSError::BufferTooBig => error!("Buffer too big"),
        SSError::BufferTooSmall(x) => error!("Buffer too small, needs {} bytes", x),
        _ => error!("Unknown storage error"),
    }
}
