use crate::core::ConfigProvider;
use crate::utils::error::{MapError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub map: MapInfo,
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    pub display: Option<DisplayOverrides>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub app_config: Option<String>,
    pub state_data: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub bundle: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayOverrides {
    pub hide_alternate: Option<bool>,
}

impl TomlConfig {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MapError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${STATE_DATA_URL})；未設定的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| MapError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let app_config = validation::validate_required_field("sources.app_config", &self.sources.app_config)?;
        let state_data = validation::validate_required_field("sources.state_data", &self.sources.state_data)?;
        validation::validate_source("sources.app_config", app_config)?;
        validation::validate_source("sources.state_data", state_data)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;
        validation::validate_range("sources.timeout_seconds", self.timeout_seconds(), 1, 300)?;
        Ok(())
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.sources
            .timeout_seconds
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn is_bundled(&self) -> bool {
        self.output.bundle.unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn app_config_source(&self) -> &str {
        self.sources.app_config.as_deref().unwrap_or_default()
    }

    fn state_data_source(&self) -> &str {
        self.sources.state_data.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn bundle_output(&self) -> bool {
        self.is_bundled()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds()
    }

    fn hide_alternate_override(&self) -> Option<bool> {
        self.display.as_ref().and_then(|d| d.hide_alternate)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[map]
name = "carrier-map"
version = "1.0.0"

[sources]
app_config = "data/appConfig.json"
state_data = "https://cdn.example.com/stateData.json"

[output]
path = "./output"
formats = ["json", "csv"]
bundle = true

[display]
hide_alternate = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.map.name, "carrier-map");
        assert_eq!(config.app_config_source(), "data/appConfig.json");
        assert_eq!(config.timeout_seconds(), 30);
        assert!(config.bundle_output());
        assert_eq!(config.hide_alternate_override(), Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CARRIER_MAP_TEST_STATE_URL", "https://test.example.com/stateData.json");

        let toml_content = r#"
[map]
name = "test"
version = "1.0"

[sources]
app_config = "data/appConfig.json"
state_data = "${CARRIER_MAP_TEST_STATE_URL}"

[output]
path = "./output"
formats = ["csv"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.state_data_source(),
            "https://test.example.com/stateData.json"
        );

        std::env::remove_var("CARRIER_MAP_TEST_STATE_URL");
    }

    #[test]
    fn test_missing_source_fails_validation() {
        let toml_content = r#"
[map]
name = "test"
version = "1.0"

[sources]
app_config = "data/appConfig.json"

[output]
path = "./output"
formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, MapError::MissingConfigError { .. }));
    }

    #[test]
    fn test_invalid_url_fails_validation() {
        let toml_content = r#"
[map]
name = "test"
version = "1.0"

[sources]
app_config = "ftp://example.com/appConfig.json"
state_data = "data/stateData.json"

[output]
path = "./output"
formats = ["json"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[map\nname = ").unwrap_err();
        assert!(matches!(err, MapError::TomlError(_)));
        assert_eq!(err.category(), crate::utils::error::ErrorCategory::Configuration);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[map]
name = "file-test"
version = "1.0"

[sources]
app_config = "a.json"
state_data = "b.json"
timeout_seconds = 10

[output]
path = "./output"
formats = ["csv"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.map.name, "file-test");
        assert_eq!(config.timeout_seconds(), 10);
        assert!(!config.bundle_output());
    }
}
