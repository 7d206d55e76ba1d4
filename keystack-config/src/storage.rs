use keystack::config::StorageConfig;

use crate::KeyboardTomlConfig;
use crate::error::{ConfigError, ConfigResult};

impl KeyboardTomlConfig {
    pub fn get_storage_config(&self) -> ConfigResult<StorageConfig> {
        let config = match self.storage {
            Some(storage) => StorageConfig {
                start_addr: storage.start_addr,
                num_sectors: storage.num_sectors,
                clear_storage: storage.clear_storage,
            },
            None => StorageConfig::default(),
        };
        if config.num_sectors < 2 {
            return Err(ConfigError::validation(
                "storage.num_sectors",
                format!("At least 2 sectors are needed, got {}", config.num_sectors),
            ));
        }
        Ok(config)
    }
}
