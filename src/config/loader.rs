use super::types::Config;
use crate::debug_println;
use crate::error::{MeterbookError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured document path
pub const DATA_FILE_ENV: &str = "METERBOOK_DATA";

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the meterbook home directory (~/.meterbook/)
    pub fn get_home_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".meterbook")
        } else {
            PathBuf::from(".meterbook")
        }
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Config> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        debug_println!("Loading config from {}", config_path.display());
        ConfigLoader::load_from_path(config_path)
    }

    /// Save configuration to default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the default config file path (~/.meterbook/config.toml)
    pub fn get_config_path() -> PathBuf {
        ConfigLoader::get_home_path().join("config.toml")
    }

    /// Resolve the document path
    ///
    /// Precedence: explicit override, then `METERBOOK_DATA`, then the config
    /// file, then ~/.meterbook/data.json.
    pub fn data_path(&self, cli_override: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_override {
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(DATA_FILE_ENV) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        self.storage
            .data_file
            .clone()
            .unwrap_or_else(|| ConfigLoader::get_home_path().join("data.json"))
    }

    /// Directory for exports without an explicit path
    pub fn export_dir(&self) -> PathBuf {
        self.storage
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Initialize config directory and create default config
    pub fn init() -> Result<()> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            println!("Created config at {}", config_path.display());
        } else {
            println!("Config already exists at {}", config_path.display());
        }

        Ok(())
    }

    /// Validate configuration
    pub fn check(&self) -> Result<()> {
        if let Some(data_file) = &self.storage.data_file {
            if data_file.as_os_str().is_empty() {
                return Err(MeterbookError::Config("data_file is empty".to_string()));
            }
            if data_file.is_dir() {
                return Err(MeterbookError::Config(format!(
                    "data_file {} is a directory",
                    data_file.display()
                )));
            }
        }

        if let Some(export_dir) = &self.storage.export_dir {
            if export_dir.exists() && !export_dir.is_dir() {
                return Err(MeterbookError::Config(format!(
                    "export_dir {} is not a directory",
                    export_dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Print configuration as TOML
    pub fn print(&self) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        println!("{}", content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            storage: StorageConfig {
                data_file: Some(PathBuf::from("/from/config.json")),
                export_dir: None,
            },
        };
        let path = config.data_path(Some(Path::new("/from/cli.json")));
        assert_eq!(path, PathBuf::from("/from/cli.json"));
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config {
            storage: StorageConfig {
                data_file: Some(PathBuf::from("/srv/meterbook/data.json")),
                export_dir: Some(PathBuf::from("/srv/meterbook/exports")),
            },
        };
        let content = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&content).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
        assert_eq!(parsed.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_check_rejects_directory_data_file() {
        let config = Config {
            storage: StorageConfig {
                data_file: Some(std::env::temp_dir()),
                export_dir: None,
            },
        };
        assert!(matches!(config.check(), Err(MeterbookError::Config(_))));
        assert!(Config::default().check().is_ok());
    }
}
