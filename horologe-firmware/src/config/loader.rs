//! Configuration loader
//!
//! A TOML copy stored in flash wins over the configuration compiled into
//! the firmware. Anything unreadable falls through to the next source.

use core::str;
use defmt::*;

use horologe_core::config::{parse_config, ClockConfig, ParseError};
use horologe_hal::flash::{FlashError, FlashStorage, StorageKey};

/// Maximum TOML config size
const MAX_TOML_SIZE: usize = 1024;

/// Why the stored configuration was not used
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Flash operation failed
    Flash(FlashError),
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// TOML parsing or validation failed
    Parse(ParseError),
}

impl From<FlashError> for LoadError {
    fn from(e: FlashError) -> Self {
        LoadError::Flash(e)
    }
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

/// Loads [`ClockConfig`] at boot
pub struct ConfigLoader<F> {
    storage: F,
}

impl<F: FlashStorage> ConfigLoader<F> {
    pub fn new(storage: F) -> Self {
        Self { storage }
    }

    /// Consume the loader and return the underlying storage
    ///
    /// The epoch store shares the same flash partition.
    pub fn into_storage(self) -> F {
        self.storage
    }

    /// Load the configuration, never failing
    ///
    /// Order: flash copy, then `embedded`, then [`ClockConfig::default`].
    pub async fn load(&mut self, embedded: &str) -> ClockConfig {
        match self.load_flash().await {
            Ok(config) => {
                info!("Loaded configuration from flash");
                return config;
            }
            Err(LoadError::Flash(FlashError::NotFound)) => {
                debug!("No stored config, using embedded defaults");
            }
            Err(e) => {
                warn!("Stored config rejected: {:?}, using embedded defaults", e);
            }
        }

        match parse_config(embedded) {
            Ok(config) => config,
            Err(e) => {
                error!("Embedded config invalid: {:?}, using built-in defaults", e);
                ClockConfig::default()
            }
        }
    }

    async fn load_flash(&mut self) -> Result<ClockConfig, LoadError> {
        let mut buffer = [0u8; MAX_TOML_SIZE];
        let len = self
            .storage
            .read(StorageKey::ClockConfigToml, &mut buffer)
            .await?;

        debug!("Read {} bytes of TOML from flash", len);

        let toml_str = str::from_utf8(&buffer[..len]).map_err(|_| LoadError::InvalidUtf8)?;
        Ok(parse_config(toml_str)?)
    }
}
