use super::types::{Config, StorageConfig};
use crate::billing::Settings;

/// Built-in defaults used for new documents and to backfill imported ones
pub const DEFAULT_SETTINGS: Settings = Settings {
    default_water_unit_price: 3.5,
    default_electric_unit_price: 0.8,
    default_extra_fee: 0.0,
};

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig::default(),
        }
    }
}
