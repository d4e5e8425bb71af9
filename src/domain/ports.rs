use crate::domain::documents::LoadedDocuments;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 輸出檔的寫入目的地
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// appConfig.json 的 URL 或本機路徑
    fn app_config_source(&self) -> &str;
    /// stateData.json 的 URL 或本機路徑
    fn state_data_source(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn bundle_output(&self) -> bool;
    fn timeout_seconds(&self) -> u64;
    /// 命令列 / TOML 對 `legend.hideAlternate` 的覆寫
    fn hide_alternate_override(&self) -> Option<bool> {
        None
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// transform 產生、load 輸出的狀態
    type Output: Send + Sync;

    async fn extract(&self) -> Result<LoadedDocuments>;
    async fn transform(&self, documents: LoadedDocuments) -> Result<Self::Output>;
    async fn load(&self, output: &Self::Output) -> Result<String>;
}
