use crate::domain::documents::DisplayConfig;
use serde::Serialize;

/// 已知的承保商種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CarrierKind {
    Default,
    Alternate,
    Both,
    Restricted,
}

impl CarrierKind {
    pub const ALL: [CarrierKind; 4] = [
        CarrierKind::Default,
        CarrierKind::Alternate,
        CarrierKind::Both,
        CarrierKind::Restricted,
    ];

    /// 寫入紀錄中的標籤
    pub fn tag(&self) -> &'static str {
        match self {
            CarrierKind::Default => "Default",
            CarrierKind::Alternate => "Alternate",
            CarrierKind::Both => "Both",
            CarrierKind::Restricted => "Restricted",
        }
    }

    /// 顏色鍵，同時也是篩選器使用的值
    pub fn color_key(&self) -> &'static str {
        match self {
            CarrierKind::Default => "default",
            CarrierKind::Alternate => "alternate",
            CarrierKind::Both => "both",
            CarrierKind::Restricted => "restricted",
        }
    }

    pub fn default_color(&self) -> &'static str {
        match self {
            CarrierKind::Default => "#7c5cff",
            CarrierKind::Alternate => "#22c1a4",
            CarrierKind::Both => "#f2b84b",
            CarrierKind::Restricted => "#ef5b6b",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| raw.eq_ignore_ascii_case(kind.color_key()))
    }
}

/// 分類結果：地圖填色、圖例、篩選與卡片色點共用
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub kind: CarrierKind,
    pub label: String,
    pub color_key: &'static str,
}

impl DisplayConfig {
    pub fn label_for(&self, kind: CarrierKind) -> &str {
        let configured = match kind {
            CarrierKind::Default => self.default.as_deref(),
            CarrierKind::Alternate => self.alternate.as_deref(),
            CarrierKind::Both => self.both.as_deref(),
            CarrierKind::Restricted => self.restricted.as_deref(),
        };
        configured
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(kind.tag())
    }

    pub fn color_for(&self, kind: CarrierKind) -> &str {
        self.colors
            .get(kind.color_key())
            .map(String::as_str)
            .unwrap_or(kind.default_color())
    }

    /// 在目前設定下 classify 可能產生的種類
    pub fn is_reachable(&self, kind: CarrierKind) -> bool {
        !(self.hide_alternate && kind == CarrierKind::Both)
    }

    fn recognize(&self, tag: &str) -> Option<CarrierKind> {
        let tag = tag.trim();
        if tag.is_empty() {
            return None;
        }
        if let Some(kind) = CarrierKind::parse(tag) {
            return Some(kind);
        }
        if let Some(kind) = CarrierKind::ALL
            .into_iter()
            .find(|kind| tag.eq_ignore_ascii_case(self.label_for(*kind)))
        {
            return Some(kind);
        }
        self.aliases
            .iter()
            .find(|(alias, _)| tag.eq_ignore_ascii_case(alias.trim()))
            .and_then(|(_, kind)| CarrierKind::parse(kind))
    }
}

/// 將承保商標籤轉成顯示用的種類、文字與顏色鍵
pub fn classify(carrier: Option<&str>, display: &DisplayConfig) -> Classification {
    let mut kind = carrier
        .and_then(|tag| display.recognize(tag))
        .unwrap_or(CarrierKind::Default);

    if display.hide_alternate && kind == CarrierKind::Both {
        kind = CarrierKind::Default;
    }

    Classification {
        kind,
        label: display.label_for(kind).to_string(),
        color_key: kind.color_key(),
    }
}
