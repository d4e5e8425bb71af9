use crate::core::classifier::classify;
use crate::domain::documents::{DisplayConfig, FieldDescriptor};
use crate::domain::model::{RegionRecord, CARRIER_KEY};
use serde::Serialize;

/// 卡片上的一列
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedField {
    pub label: String,
    pub value: String,
    pub show_color: bool,
}

/// 預設欄位清單，提示框與詳細面板共用
pub fn default_field_descriptors() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(CARRIER_KEY, "Primary Carrier", true),
        FieldDescriptor::new("largeGroupThreshold", "Large Group Definition", false),
        FieldDescriptor::new("coverageNotes", "Coverage Notes", false),
        FieldDescriptor::new("sdiRequirements", "SDI Requirements", false),
        FieldDescriptor::new("ageGroupNotes", "Age Group Notes", false),
        FieldDescriptor::new("salesNotes", "Sales Nuances", false),
    ]
}

/// 依欄位描述依序投影紀錄；carrier 一定輸出，其餘空值略過
pub fn project(
    record: &RegionRecord,
    descriptors: &[FieldDescriptor],
    display: &DisplayConfig,
) -> Vec<ProjectedField> {
    descriptors
        .iter()
        .filter_map(|descriptor| {
            let value = if descriptor.key == CARRIER_KEY {
                classify(record.carrier(), display).label
            } else {
                let value = record.get(&descriptor.key)?;
                if value.is_empty() {
                    return None;
                }
                value.to_string()
            };

            Some(ProjectedField {
                label: descriptor.label.clone(),
                value,
                show_color: descriptor.show_color,
            })
        })
        .collect()
}
