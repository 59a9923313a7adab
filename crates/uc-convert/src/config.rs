//! Converter configuration.
//!
//! ```yaml
//! table_dir: /opt/ioc/exc
//! naming: fixed_affix
//! noise_seed: 42
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uc_table::TableLoader;

use crate::error::{ConvertError, ConvertResult};
use crate::naming::NamingStrategy;

/// Table directory used when none is configured, relative to the IOC boot directory.
pub const DEFAULT_TABLE_DIR: &str = "../../exc/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Base directory all table resource names are resolved against.
    pub table_dir: PathBuf,
    pub naming: NamingStrategy,
    /// Seed for reproducible noise; entropy-seeded when absent.
    pub noise_seed: Option<u64>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            table_dir: PathBuf::from(DEFAULT_TABLE_DIR),
            naming: NamingStrategy::default(),
            noise_seed: None,
        }
    }
}

impl ConverterConfig {
    pub fn with_table_dir(table_dir: impl Into<PathBuf>) -> Self {
        Self {
            table_dir: table_dir.into(),
            ..Self::default()
        }
    }

    pub fn loader(&self) -> TableLoader {
        TableLoader::new(&self.table_dir)
    }
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> ConvertResult<ConverterConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConvertError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Save configuration to a YAML file.
pub fn save_config(path: &Path, config: &ConverterConfig) -> ConvertResult<()> {
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content).map_err(|source| ConvertError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })
}
