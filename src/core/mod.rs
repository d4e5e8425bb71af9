pub mod classifier;
pub mod compositor;
pub mod engine;
pub mod export;
pub mod pipeline;
pub mod projector;
pub mod registry;
pub mod rules;
pub mod state;

pub use crate::domain::model::{RegionRecord, StateDataMap};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
