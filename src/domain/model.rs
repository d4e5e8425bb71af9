use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 設定檔中的自由欄位值：文字、布林或數字
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(serde_json::Number),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// 空字串或只有空白視為空值
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 只有布林 true 或文字 "true" (不分大小寫) 為真；"yes"、"no"、數字等一律為假
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => s.trim().eq_ignore_ascii_case("true"),
            FieldValue::Number(_) => false,
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Text(String::new()),
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => FieldValue::Number(n),
            serde_json::Value::String(s) => FieldValue::Text(s),
            // 巢狀結構保留為 JSON 文字，不拒絕
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => n.serialize(serializer),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Bool(true) => f.write_str("Yes"),
            FieldValue::Bool(false) => f.write_str("No"),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// 單一區域的部分欄位覆寫
pub type Patch = BTreeMap<String, FieldValue>;

/// 大型團體的員工門檻
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LargeGroupThreshold {
    /// 51+ FTEs
    Lower,
    /// 101+ FTEs
    Higher,
    /// 覆寫檔提供的其他文字，原樣保留
    Custom(String),
}

impl LargeGroupThreshold {
    pub const LOWER_LABEL: &'static str = "51+ FTEs";
    pub const HIGHER_LABEL: &'static str = "101+ FTEs";

    pub fn label(&self) -> &str {
        match self {
            LargeGroupThreshold::Lower => Self::LOWER_LABEL,
            LargeGroupThreshold::Higher => Self::HIGHER_LABEL,
            LargeGroupThreshold::Custom(s) => s,
        }
    }

    /// 只有完全相同的標籤會對應到已知門檻，其他文字原樣保留
    pub fn parse(raw: &str) -> Self {
        match raw {
            Self::LOWER_LABEL => LargeGroupThreshold::Lower,
            Self::HIGHER_LABEL => LargeGroupThreshold::Higher,
            other => LargeGroupThreshold::Custom(other.to_string()),
        }
    }
}

impl Serialize for LargeGroupThreshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for LargeGroupThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const CARRIER_KEY: &str = "carrier";
pub const IMPORTANT_KEY: &str = "important";
pub const LARGE_GROUP_KEY: &str = "largeGroupThreshold";
pub const LARGE_GROUP_ALIAS: &str = "largeGroupDefinition";

/// 解析完成後的單一區域資料
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_group_threshold: Option<LargeGroupThreshold>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub important: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl RegionRecord {
    pub fn with_carrier(carrier: impl Into<String>) -> Self {
        Self {
            carrier: Some(carrier.into()),
            ..Default::default()
        }
    }

    /// 寫入單一欄位；已知欄位轉成對應型別，其餘放入延伸欄位
    pub fn set(&mut self, key: &str, value: FieldValue) {
        match key {
            CARRIER_KEY => self.carrier = Some(value.to_string()),
            IMPORTANT_KEY => self.important = value.is_truthy(),
            LARGE_GROUP_KEY | LARGE_GROUP_ALIAS => {
                self.large_group_threshold = Some(LargeGroupThreshold::parse(&value.to_string()))
            }
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// 以統一的方式讀取欄位；`important` 為 false 時視為不存在
    pub fn get(&self, key: &str) -> Option<FieldValue> {
        match key {
            CARRIER_KEY => self.carrier.as_deref().map(FieldValue::from),
            IMPORTANT_KEY => self.important.then_some(FieldValue::Bool(true)),
            LARGE_GROUP_KEY | LARGE_GROUP_ALIAS => self
                .large_group_threshold
                .as_ref()
                .map(|t| FieldValue::text(t.label())),
            _ => self.extra.get(key).cloned(),
        }
    }

    pub fn carrier(&self) -> Option<&str> {
        self.carrier.as_deref()
    }
}

/// 區域代碼 -> 解析後資料
pub type StateDataMap = BTreeMap<String, RegionRecord>;

/// 區域代碼一律去除空白並轉為大寫
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
