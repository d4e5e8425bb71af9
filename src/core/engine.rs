use crate::core::state::MapState;
use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// 一次完整執行的結果
#[derive(Debug)]
pub struct RunOutcome {
    pub state: MapState,
    pub output_path: String,
}

pub struct MapEngine<P: Pipeline<Output = MapState>> {
    pipeline: P,
}

impl<P: Pipeline<Output = MapState>> MapEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 載入兩份文件並解析；任何一步失敗都會中止初始化
    pub async fn initialize(&self) -> Result<MapState> {
        let started = Instant::now();

        tracing::info!("📥 Loading configuration documents...");
        let documents = self.pipeline.extract().await?;

        tracing::info!("🔄 Resolving state data...");
        let state = self.pipeline.transform(documents).await?;
        tracing::info!(
            "✅ Resolved {} regions ({} important) in {:?}",
            state.states.len(),
            state.important_codes().len(),
            started.elapsed()
        );

        Ok(state)
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        let state = self.initialize().await?;

        tracing::info!("💾 Exporting resolved data...");
        let output_path = self.pipeline.load(&state).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(RunOutcome { state, output_path })
    }
}
