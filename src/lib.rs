pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::toml_config::TomlConfig;

pub use crate::core::classifier::{classify, CarrierKind, Classification};
pub use crate::core::compositor::{merge_over, resolve};
pub use crate::core::engine::{MapEngine, RunOutcome};
pub use crate::core::pipeline::CarrierPipeline;
pub use crate::core::projector::{default_field_descriptors, project, ProjectedField};
pub use crate::core::registry::{Region, RegionRegistry};
pub use crate::core::rules::build_baseline;
pub use crate::core::state::{Card, FilterSet, LegendEntry, MapState, Surface};
pub use crate::domain::documents::{AppConfig, DisplayConfig, FieldDescriptor, OverrideSet, Rules, StateConfig};
pub use crate::domain::model::{FieldValue, LargeGroupThreshold, Patch, RegionRecord, StateDataMap};
pub use crate::utils::error::{MapError, Result};
