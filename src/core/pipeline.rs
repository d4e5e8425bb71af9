use crate::core::export::{self, BUNDLE_FILENAME};
use crate::core::registry::RegionRegistry;
use crate::core::state::MapState;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::documents::{AppConfig, LoadedDocuments, StateConfig};
use crate::utils::error::{MapError, Result};
use crate::utils::validation::is_remote;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const APP_CONFIG_DOCUMENT: &str = "appConfig.json";
pub const STATE_DATA_DOCUMENT: &str = "stateData.json";

pub struct CarrierPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    registry: RegionRegistry,
}

impl<S: Storage, C: ConfigProvider> CarrierPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("🔶 Failed to build HTTP client with timeout ({}), using defaults", e);
                Client::new()
            });

        Self {
            storage,
            config,
            client,
            registry: RegionRegistry::us_states(),
        }
    }

    /// 替換區域登錄表 (預設為 50 州 + DC)
    pub fn with_registry(mut self, registry: RegionRegistry) -> Self {
        self.registry = registry;
        self
    }

    async fn fetch_document<T: DeserializeOwned + Send>(&self, document: &str, source: &str) -> Result<T> {
        let body = if is_remote(source) {
            tracing::debug!("📡 Fetching {} from: {}", document, source);
            let response = self.client.get(source).send().await?;
            tracing::debug!("📡 {} response status: {}", document, response.status());

            if !response.status().is_success() {
                return Err(MapError::FetchError {
                    document: document.to_string(),
                    source_path: source.to_string(),
                    status: response.status().as_u16(),
                });
            }
            response.text().await?
        } else {
            tracing::debug!("📂 Reading {} from: {}", document, source);
            tokio::fs::read_to_string(source).await?
        };

        serde_json::from_str(&body).map_err(|e| MapError::DocumentParseError {
            document: document.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CarrierPipeline<S, C> {
    type Output = MapState;

    async fn extract(&self) -> Result<LoadedDocuments> {
        // 兩份文件同時載入，任一失敗即中止
        let (app, state) = tokio::try_join!(
            self.fetch_document::<AppConfig>(APP_CONFIG_DOCUMENT, self.config.app_config_source()),
            self.fetch_document::<StateConfig>(STATE_DATA_DOCUMENT, self.config.state_data_source()),
        )?;

        tracing::debug!(
            "Loaded rules and overrides: {} restricted, {} important, {} notable",
            state.restricted_states.len(),
            state.important_states.len(),
            state.notable_states.len()
        );

        Ok(LoadedDocuments { app, state })
    }

    async fn transform(&self, mut documents: LoadedDocuments) -> Result<MapState> {
        if let Some(hide) = self.config.hide_alternate_override() {
            tracing::debug!("🔧 hideAlternate overridden to: {}", hide);
            documents.app.legend.hide_alternate = hide;
        }
        Ok(MapState::build(documents, self.registry.clone()))
    }

    async fn load(&self, state: &MapState) -> Result<String> {
        let outputs = export::render_outputs(state, self.config.output_formats())?;

        if outputs.is_empty() {
            tracing::warn!("🔶 No output formats requested, nothing written");
            return Ok(self.config.output_path().to_string());
        }

        if self.config.bundle_output() {
            let zip_data = export::bundle(&outputs)?;
            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(BUNDLE_FILENAME, &zip_data).await?;
            return Ok(format!("{}/{}", self.config.output_path(), BUNDLE_FILENAME));
        }

        for (filename, content) in &outputs {
            tracing::debug!("Writing {} ({} bytes)", filename, content.len());
            self.storage.write_file(filename, content.as_bytes()).await?;
        }
        Ok(self.config.output_path().to_string())
    }
}
