pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "carrier-map")]
#[command(about = "Resolve U.S. carrier availability per state and export it for the map")]
pub struct CliConfig {
    /// appConfig.json URL or path
    #[arg(long, default_value = "data/appConfig.json")]
    pub app_config: String,

    /// stateData.json URL or path
    #[arg(long, default_value = "data/stateData.json")]
    pub state_data: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json,csv")]
    pub formats: Vec<String>,

    #[arg(long, help = "Bundle the exported files into a single ZIP")]
    pub bundle: bool,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Override legend.hideAlternate from appConfig.json")]
    pub hide_alternate: Option<bool>,

    #[arg(long, help = "Print the detail card for a state code, FIPS id or name")]
    pub state: Option<String>,

    #[arg(long, help = "Find a state by name or code prefix")]
    pub search: Option<String>,

    #[arg(long, value_delimiter = ',', help = "List states passing a filter, e.g. default,restricted,important")]
    pub filter: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Resolve and report without writing any files")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn app_config_source(&self) -> &str {
        &self.app_config
    }

    fn state_data_source(&self) -> &str {
        &self.state_data
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn bundle_output(&self) -> bool {
        self.bundle
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn hide_alternate_override(&self) -> Option<bool> {
        self.hide_alternate
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_source("app_config", &self.app_config)?;
        validation::validate_source("state_data", &self.state_data)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}
