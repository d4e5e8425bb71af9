use crate::core::classifier::CarrierKind;
use crate::domain::documents::OverrideSet;
use crate::domain::model::{FieldValue, Patch, RegionRecord, StateDataMap, CARRIER_KEY, IMPORTANT_KEY};
use std::collections::BTreeMap;

/// 覆寫層的種類，依固定順序套用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Restricted,
    Important,
    Notable,
}

impl LayerKind {
    pub const ORDER: [LayerKind; 3] = [LayerKind::Restricted, LayerKind::Important, LayerKind::Notable];

    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Restricted => "restricted",
            LayerKind::Important => "important",
            LayerKind::Notable => "notable",
        }
    }

    /// 合併 patch 之前強制寫入的欄位
    fn forced_field(&self) -> Option<(&'static str, FieldValue)> {
        match self {
            LayerKind::Restricted => Some((CARRIER_KEY, FieldValue::text(CarrierKind::Restricted.tag()))),
            LayerKind::Important => Some((IMPORTANT_KEY, FieldValue::Bool(true))),
            LayerKind::Notable => None,
        }
    }
}

/// 一層覆寫：種類 + 區域代碼 -> patch
#[derive(Debug, Clone, Copy)]
pub struct OverrideLayer<'a> {
    pub kind: LayerKind,
    pub patches: &'a BTreeMap<String, Patch>,
}

impl OverrideSet {
    /// 依 restricted -> important -> notable 排列的覆寫層
    pub fn layers(&self) -> Vec<OverrideLayer<'_>> {
        LayerKind::ORDER
            .iter()
            .map(|&kind| OverrideLayer {
                kind,
                patches: match kind {
                    LayerKind::Restricted => &self.restricted,
                    LayerKind::Important => &self.important,
                    LayerKind::Notable => &self.notable,
                },
            })
            .collect()
    }
}

/// 淺層合併：patch 中的每個 key 覆蓋 record，未出現的 key 保留
pub fn merge_over(record: &mut RegionRecord, patch: &Patch) {
    for (key, value) in patch {
        record.set(key, value.clone());
    }
}

fn apply_layer(mut states: StateDataMap, layer: OverrideLayer<'_>) -> StateDataMap {
    for (code, patch) in layer.patches {
        let record = states.entry(code.clone()).or_insert_with(|| {
            tracing::debug!(
                "🔶 {} override references unknown region '{}', creating record",
                layer.kind.name(),
                code
            );
            RegionRecord::default()
        });

        if let Some((key, value)) = layer.kind.forced_field() {
            record.set(key, value);
        }
        merge_over(record, patch);
    }
    states
}

/// 將三層覆寫依序套用到基礎資料上
pub fn resolve(baseline: StateDataMap, overrides: &OverrideSet) -> StateDataMap {
    overrides.layers().into_iter().fold(baseline, |states, layer| {
        tracing::debug!(
            "🔄 Applying {} layer ({} regions)",
            layer.kind.name(),
            layer.patches.len()
        );
        apply_layer(states, layer)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LargeGroupThreshold;

    fn patch(entries: &[(&str, FieldValue)]) -> Patch {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn baseline() -> StateDataMap {
        let mut states = StateDataMap::new();
        for code in ["A", "B"] {
            let mut record = RegionRecord::with_carrier("Default");
            record.large_group_threshold = Some(LargeGroupThreshold::Lower);
            states.insert(code.to_string(), record);
        }
        states
    }

    #[test]
    fn test_empty_overrides_are_noop() {
        let resolved = resolve(baseline(), &OverrideSet::default());
        assert_eq!(resolved, baseline());
    }

    #[test]
    fn test_restricted_pass_forces_carrier() {
        let mut overrides = OverrideSet::default();
        overrides.restricted.insert(
            "A".to_string(),
            patch(&[("coverageNotes", FieldValue::text("PEO compliance"))]),
        );

        let resolved = resolve(baseline(), &overrides);

        assert_eq!(resolved["A"].carrier(), Some("Restricted"));
        assert_eq!(
            resolved["A"].get("coverageNotes"),
            Some(FieldValue::text("PEO compliance"))
        );
        assert_eq!(resolved["B"].carrier(), Some("Default"));
    }

    #[test]
    fn test_restricted_patch_carrier_wins_over_forced_value() {
        let mut overrides = OverrideSet::default();
        overrides
            .restricted
            .insert("A".to_string(), patch(&[("carrier", FieldValue::text("Both"))]));

        let resolved = resolve(baseline(), &overrides);
        assert_eq!(resolved["A"].carrier(), Some("Both"));
    }

    #[test]
    fn test_important_pass_sets_flag() {
        let mut overrides = OverrideSet::default();
        overrides.important.insert(
            "B".to_string(),
            patch(&[("ageGroupNotes", FieldValue::text("Age-banded"))]),
        );

        let resolved = resolve(baseline(), &overrides);

        assert!(resolved["B"].important);
        assert!(!resolved["A"].important);
        assert_eq!(
            resolved["B"].get("ageGroupNotes"),
            Some(FieldValue::text("Age-banded"))
        );
    }

    #[test]
    fn test_important_patch_can_clear_flag() {
        let mut overrides = OverrideSet::default();
        overrides
            .important
            .insert("B".to_string(), patch(&[("important", FieldValue::Bool(false))]));

        let resolved = resolve(baseline(), &overrides);
        assert!(!resolved["B"].important);
    }

    #[test]
    fn test_last_writer_wins_per_field() {
        let mut overrides = OverrideSet::default();
        overrides.restricted.insert(
            "A".to_string(),
            patch(&[
                ("coverageNotes", FieldValue::text("restricted note")),
                ("salesNotes", FieldValue::text("restricted sales")),
            ]),
        );
        overrides.notable.insert(
            "A".to_string(),
            patch(&[("coverageNotes", FieldValue::text("notable note"))]),
        );

        let resolved = resolve(baseline(), &overrides);
        let a = &resolved["A"];

        assert_eq!(a.get("coverageNotes"), Some(FieldValue::text("notable note")));
        assert_eq!(a.get("salesNotes"), Some(FieldValue::text("restricted sales")));
        // notable 沒有指定 carrier，保留 restricted 強制的值
        assert_eq!(a.carrier(), Some("Restricted"));
    }

    #[test]
    fn test_notable_carrier_overrides_restricted() {
        let mut overrides = OverrideSet::default();
        overrides.restricted.insert("A".to_string(), Patch::new());
        overrides
            .notable
            .insert("A".to_string(), patch(&[("carrier", FieldValue::text("Alternate"))]));

        let resolved = resolve(baseline(), &overrides);
        assert_eq!(resolved["A"].carrier(), Some("Alternate"));
    }

    #[test]
    fn test_unknown_region_in_notable_is_created() {
        let mut overrides = OverrideSet::default();
        overrides.notable.insert(
            "C".to_string(),
            patch(&[("coverageNotes", FieldValue::text("X"))]),
        );

        let resolved = resolve(baseline(), &overrides);

        assert_eq!(resolved.len(), 3);
        let c = &resolved["C"];
        assert_eq!(c.get("coverageNotes"), Some(FieldValue::text("X")));
        assert!(c.carrier.is_none());
        assert!(c.large_group_threshold.is_none());
        assert!(!c.important);
    }

    #[test]
    fn test_unknown_region_in_restricted_gets_forced_carrier() {
        let mut overrides = OverrideSet::default();
        overrides.restricted.insert("PR".to_string(), Patch::new());

        let resolved = resolve(baseline(), &overrides);
        assert_eq!(resolved["PR"].carrier(), Some("Restricted"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut overrides = OverrideSet::default();
        overrides
            .important
            .insert("A".to_string(), patch(&[("salesNotes", FieldValue::text("s"))]));
        overrides
            .notable
            .insert("B".to_string(), patch(&[("sdiRequirements", FieldValue::text("SDI"))]));

        let first = resolve(baseline(), &overrides);
        let second = resolve(baseline(), &overrides);
        assert_eq!(first, second);
    }

    #[test]
    fn test_layers_follow_fixed_order() {
        let kinds: Vec<LayerKind> = OverrideSet::default().layers().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, LayerKind::ORDER.to_vec());
    }
}
