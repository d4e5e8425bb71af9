use crate::core::classifier::{classify, CarrierKind, Classification};
use crate::core::compositor::resolve;
use crate::core::projector::{default_field_descriptors, project, ProjectedField};
use crate::core::registry::{Region, RegionRegistry};
use crate::core::rules::build_baseline;
use crate::domain::documents::{AppConfig, FieldDescriptor, LoadedDocuments, OverrideSet};
use crate::domain::model::{RegionRecord, StateDataMap};
use serde::Serialize;
use std::collections::BTreeSet;

/// 卡片的呈現位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Tooltip,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub kind: CarrierKind,
    pub label: String,
    pub color: String,
}

/// 提示框 / 詳細面板的內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    pub code: String,
    pub important: bool,
    pub color: String,
    pub fields: Vec<ProjectedField>,
}

/// 篩選器：啟用的承保商種類 + 是否顯示 important 區域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    pub carriers: BTreeSet<CarrierKind>,
    pub include_important: bool,
}

impl FilterSet {
    pub fn all() -> Self {
        Self {
            carriers: CarrierKind::ALL.into_iter().collect(),
            include_important: true,
        }
    }

    /// 解析如 `default,restricted,important` 的清單，無法辨識的值略過
    pub fn parse(values: &[String]) -> Self {
        let mut filter = Self {
            carriers: BTreeSet::new(),
            include_important: false,
        };
        for value in values {
            let value = value.trim();
            if value.eq_ignore_ascii_case("important") {
                filter.include_important = true;
            } else if let Some(kind) = CarrierKind::parse(value) {
                filter.carriers.insert(kind);
            } else {
                tracing::warn!("🔶 Ignoring unknown filter value: {}", value);
            }
        }
        filter
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::all()
    }
}

/// 一次載入週期的應用程式狀態；建立後唯讀
#[derive(Debug, Clone)]
pub struct MapState {
    pub app: AppConfig,
    pub registry: RegionRegistry,
    pub states: StateDataMap,
}

impl MapState {
    pub fn build(documents: LoadedDocuments, registry: RegionRegistry) -> Self {
        let LoadedDocuments { app, state } = documents;
        let baseline = build_baseline(&registry, &state.rules);
        let overrides = OverrideSet::from_state_config(&state);
        let states = resolve(baseline, &overrides);

        tracing::debug!(
            "Resolved {} regions ({} from registry)",
            states.len(),
            registry.len()
        );

        Self {
            app,
            registry,
            states,
        }
    }

    pub fn record(&self, code: &str) -> Option<&RegionRecord> {
        self.states.get(code)
    }

    pub fn classify(&self, code: &str) -> Classification {
        classify(
            self.record(code).and_then(RegionRecord::carrier),
            &self.app.legend,
        )
    }

    /// 地圖填色
    pub fn fill_color(&self, code: &str) -> &str {
        self.app.legend.color_for(self.classify(code).kind)
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        let display = &self.app.legend;
        CarrierKind::ALL
            .into_iter()
            .filter(|kind| display.is_reachable(*kind))
            .map(|kind| LegendEntry {
                kind,
                label: display.label_for(kind).to_string(),
                color: display.color_for(kind).to_string(),
            })
            .collect()
    }

    pub fn field_descriptors(&self, surface: Surface) -> Vec<FieldDescriptor> {
        let configured = match surface {
            Surface::Tooltip => self
                .app
                .tooltip_fields
                .as_ref()
                .or(self.app.card_fields.as_ref()),
            Surface::Detail => self.app.card_fields.as_ref(),
        };
        configured
            .filter(|fields| !fields.is_empty())
            .cloned()
            .unwrap_or_else(default_field_descriptors)
    }

    pub fn card(&self, code: &str, surface: Surface) -> Option<Card> {
        let region = self.registry.by_code(code);
        let record = self.record(code);
        if region.is_none() && record.is_none() {
            return None;
        }

        let empty = RegionRecord::default();
        let record = record.unwrap_or(&empty);
        let name = region.map(|r| r.name.as_str()).unwrap_or(code);
        let title = if record.important {
            format!("{} ({}) *", name, code)
        } else {
            format!("{} ({})", name, code)
        };

        Some(Card {
            title,
            code: code.to_string(),
            important: record.important,
            color: self.fill_color(code).to_string(),
            fields: project(record, &self.field_descriptors(surface), &self.app.legend),
        })
    }

    pub fn search(&self, query: &str) -> Option<&Region> {
        self.registry.search(query)
    }

    pub fn passes_filter(&self, code: &str, filter: &FilterSet) -> bool {
        let include_carrier = filter.carriers.contains(&self.classify(code).kind);
        let include_important = match self.record(code) {
            Some(record) if record.important => filter.include_important,
            _ => true,
        };
        include_carrier && include_important
    }

    /// 通過篩選的區域代碼 (依登錄表順序)
    pub fn filtered_codes(&self, filter: &FilterSet) -> Vec<&str> {
        self.registry
            .codes()
            .filter(|code| self.passes_filter(code, filter))
            .collect()
    }

    pub fn important_codes(&self) -> Vec<&str> {
        self.registry
            .codes()
            .filter(|code| self.record(code).map(|r| r.important).unwrap_or(false))
            .collect()
    }
}
