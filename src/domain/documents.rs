use crate::domain::model::{normalize_code, FieldValue, Patch};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// `appConfig.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub branding: Option<Branding>,
    #[serde(default)]
    pub footer_text: Option<String>,
    #[serde(default)]
    pub legend: DisplayConfig,
    #[serde(default)]
    pub card_fields: Option<Vec<FieldDescriptor>>,
    #[serde(default)]
    pub tooltip_fields: Option<Vec<FieldDescriptor>>,
    /// 原樣轉交給畫面，不參與解析
    #[serde(default)]
    pub territories: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl AppConfig {
    pub const DEFAULT_TITLE: &'static str = "U.S. Carrier Map";
    pub const DEFAULT_FOOTER: &'static str = "Carrier visualization";

    pub fn title(&self) -> &str {
        self.branding
            .as_ref()
            .and_then(|b| b.title.as_deref())
            .unwrap_or(Self::DEFAULT_TITLE)
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.branding.as_ref().and_then(|b| b.subtitle.as_deref())
    }

    pub fn footer(&self) -> &str {
        match self.footer_text.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => Self::DEFAULT_FOOTER,
        }
    }
}

/// 圖例與顯示設定 (appConfig 的 `legend` 區塊)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    #[serde(default, alias = "aetna")]
    pub default: Option<String>,
    #[serde(default)]
    pub alternate: Option<String>,
    #[serde(default)]
    pub both: Option<String>,
    #[serde(default)]
    pub restricted: Option<String>,
    #[serde(default)]
    pub hide_alternate: bool,
    /// 額外的承保商名稱 -> 種類 (`default` / `alternate` / `both` / `restricted`)
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// 種類 -> 顏色
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub show_color: bool,
}

impl FieldDescriptor {
    pub fn new(key: &str, label: &str, show_color: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            show_color,
        }
    }
}

/// `stateData.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateConfig {
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub restricted_states: BTreeMap<String, Patch>,
    #[serde(default)]
    pub important_states: BTreeMap<String, Patch>,
    #[serde(default)]
    pub notable_states: BTreeMap<String, Patch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    #[serde(default)]
    pub default_carrier: Option<String>,
    #[serde(default)]
    pub alternate_carrier: BTreeSet<String>,
    #[serde(default, rename = "largeGroup101")]
    pub large_group_101: BTreeSet<String>,
    #[serde(default)]
    pub restricted: BTreeSet<String>,
    /// 套用到所有區域的初始欄位
    #[serde(default)]
    pub defaults: Patch,
}

/// 同時載入完成的兩份設定文件
#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
    pub app: AppConfig,
    pub state: StateConfig,
}

/// 三個依序套用的覆寫集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideSet {
    pub restricted: BTreeMap<String, Patch>,
    pub important: BTreeMap<String, Patch>,
    pub notable: BTreeMap<String, Patch>,
}

impl OverrideSet {
    pub fn from_state_config(config: &StateConfig) -> Self {
        Self {
            restricted: normalize_keys(&config.restricted_states),
            important: normalize_keys(&config.important_states),
            notable: normalize_keys(&config.notable_states),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.restricted.is_empty() && self.important.is_empty() && self.notable.is_empty()
    }
}

fn normalize_keys(patches: &BTreeMap<String, Patch>) -> BTreeMap<String, Patch> {
    let mut normalized = BTreeMap::new();
    for (code, patch) in patches {
        let code = normalize_code(code);
        // 正規化後重複的代碼合併為同一個 patch，後出現者覆蓋
        normalized
            .entry(code)
            .or_insert_with(Patch::new)
            .extend(patch.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    normalized
}
