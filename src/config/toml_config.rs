use crate::core::tariff::Revision;
use crate::utils::error::{FareError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ride-fare.toml";
pub const DEFAULT_PREFERENCES_FILE: &str = "preferences.json";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<String>,
    pub revision: Option<Revision>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: Option<String>,
}

impl FareConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值，其餘錯誤照常回傳
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FareError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn revision(&self) -> Revision {
        self.storage.revision.unwrap_or_default()
    }

    /// 偏好設定檔位置，預設放在 $HOME/.ride-fare 下
    pub fn preferences_path(&self) -> PathBuf {
        match &self.storage.path {
            Some(path) => PathBuf::from(path),
            None => default_preferences_path(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        self.display
            .currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }
}

impl Validate for FareConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.storage.path {
            validate_path("storage.path", path)?;
        }
        if let Some(symbol) = &self.display.currency_symbol {
            validate_non_empty_string("display.currency_symbol", symbol)?;
        }
        Ok(())
    }
}

pub fn default_preferences_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".ride-fare")
            .join(DEFAULT_PREFERENCES_FILE),
        None => PathBuf::from(DEFAULT_PREFERENCES_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
path = "/tmp/fares.json"
revision = "v1"

[display]
currency_symbol = "RMB "
"#;

        let config = FareConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.revision(), Revision::V1);
        assert_eq!(config.preferences_path(), PathBuf::from("/tmp/fares.json"));
        assert_eq!(config.currency_symbol(), "RMB ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FareConfig::from_toml_str("").unwrap();
        assert_eq!(config.revision(), Revision::V2);
        assert_eq!(config.currency_symbol(), "¥");
        assert!(config.preferences_path().ends_with(DEFAULT_PREFERENCES_FILE));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RIDE_FARE_TEST_DIR", "/var/lib/ride-fare");

        let config = FareConfig::from_toml_str(
            r#"
[storage]
path = "${RIDE_FARE_TEST_DIR}/prefs.json"
"#,
        )
        .unwrap();
        assert_eq!(
            config.preferences_path(),
            PathBuf::from("/var/lib/ride-fare/prefs.json")
        );

        std::env::remove_var("RIDE_FARE_TEST_DIR");
    }

    #[test]
    fn test_unknown_revision_is_rejected() {
        let result = FareConfig::from_toml_str("[storage]\nrevision = \"v9\"\n");
        assert!(matches!(result, Err(FareError::TomlError(_))));
    }

    #[test]
    fn test_config_validation() {
        let config = FareConfig::from_toml_str("[display]\ncurrency_symbol = \"  \"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nrevision = \"v2\"\n")
            .unwrap();

        let config = FareConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.revision(), Revision::V2);

        let missing = FareConfig::from_file_or_default("/nonexistent/ride-fare.toml").unwrap();
        assert!(missing.storage.path.is_none());
    }
}
