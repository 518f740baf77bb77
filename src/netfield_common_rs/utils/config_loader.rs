use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::log_config::LogConfig;
use crate::netfield_common_rs::field::{ByteOrder, FieldError, FieldResult, IndexingMode};

/// コーデックの既定値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub byte_alignment: usize,
    pub byte_order: ByteOrder,
    pub indexing_mode: IndexingMode,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { byte_alignment: 1, byte_order: ByteOrder::Big, indexing_mode: IndexingMode::LeastSignificantFirst }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetfieldConfig {
    pub codec: CodecConfig,
    pub logging: LogConfig,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: vec![
                PathBuf::from("netfield.toml"),
                PathBuf::from("netfield.json"),
                PathBuf::from("config.toml"),
                PathBuf::from("config.json"),
            ],
            env_prefix: "NETFIELD_".into(),
        }
    }

    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { config_paths: paths, env_prefix: "NETFIELD_".into() }
    }

    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 既定値 → 最初に見つかった設定ファイル → 環境変数 の順に適用して検証する
    pub fn load(&self) -> FieldResult<NetfieldConfig> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("loaded environment from {:?}", path);
        }

        let mut config = NetfieldConfig::default();
        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }
            match self.load_from_file(path) {
                Ok(file_config) => {
                    debug!("loaded config from {:?}", path);
                    config = file_config;
                    break;
                }
                Err(e) => warn!("Failed to load config from {:?}: {}", path, e),
            }
        }

        self.apply_env_overrides(&mut config)?;
        self.validate_config(&config)?;
        Ok(config)
    }

    pub fn load_from_file(&self, path: &Path) -> FieldResult<NetfieldConfig> {
        let content = fs::read_to_string(path)
            .map_err(|e| FieldError::Config(format!("Failed to read config file: {}", e)))?;
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| FieldError::Config(format!("Failed to parse JSON config: {}", e))),
            Some("toml") => toml::from_str(&content)
                .map_err(|e| FieldError::Config(format!("Failed to parse TOML config: {}", e))),
            _ => Err(FieldError::Config("Unsupported config file format".into())),
        }
    }

    fn env_var(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", self.env_prefix, key)).ok()
    }

    fn apply_env_overrides(&self, config: &mut NetfieldConfig) -> FieldResult<()> {
        if let Some(alignment) = self.env_var("BYTE_ALIGNMENT") {
            config.codec.byte_alignment = alignment
                .parse()
                .map_err(|_| FieldError::Config("Invalid byte alignment in environment variable".into()))?;
        }
        if let Some(order) = self.env_var("BYTE_ORDER") {
            config.codec.byte_order = ByteOrder::from_str(&order).map_err(FieldError::Config)?;
        }
        if let Some(mode) = self.env_var("INDEXING_MODE") {
            config.codec.indexing_mode = IndexingMode::from_str(&mode).map_err(FieldError::Config)?;
        }
        if let Some(level) = self.env_var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(flag) = self.env_var("LOG_TIMESTAMPS") {
            config.logging.timestamps = flag
                .parse()
                .map_err(|_| FieldError::Config("Invalid timestamps flag in environment variable".into()))?;
        }
        Ok(())
    }

    fn validate_config(&self, config: &NetfieldConfig) -> FieldResult<()> {
        if config.codec.byte_alignment == 0 {
            return Err(FieldError::Config("Byte alignment must be greater than 0".into()));
        }
        match config.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => {}
            _ => {
                return Err(FieldError::Config(
                    "Invalid log level. Must be one of: trace, debug, info, warn, error, off".into(),
                ))
            }
        }
        Ok(())
    }

    pub fn save_config(&self, config: &NetfieldConfig, path: &Path) -> FieldResult<()> {
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(config)
                .map_err(|e| FieldError::Config(format!("Failed to serialize config to JSON: {}", e)))?,
            Some("toml") => toml::to_string_pretty(config)
                .map_err(|e| FieldError::Config(format!("Failed to serialize config to TOML: {}", e)))?,
            _ => return Err(FieldError::Config("Unsupported config file format for saving".into())),
        };
        fs::write(path, content).map_err(|e| FieldError::Config(format!("Failed to write config file: {}", e)))?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let loader = ConfigLoader::with_paths(vec![]).with_env_prefix("NETFIELD_TEST_DEFAULTS_");
        let config = loader.load().unwrap();
        assert_eq!(config, NetfieldConfig::default());
    }

    #[test]
    fn test_zero_alignment_rejected() {
        let loader = ConfigLoader::with_paths(vec![]);
        let mut config = NetfieldConfig::default();
        config.codec.byte_alignment = 0;
        assert!(loader.validate_config(&config).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let loader = ConfigLoader::new();
        assert!(loader.save_config(&NetfieldConfig::default(), Path::new("netfield.yaml")).is_err());
    }
}
