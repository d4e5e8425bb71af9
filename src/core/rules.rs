use crate::core::classifier::CarrierKind;
use crate::core::compositor::merge_over;
use crate::core::registry::RegionRegistry;
use crate::domain::documents::Rules;
use crate::domain::model::{normalize_code, LargeGroupThreshold, RegionRecord, StateDataMap};
use std::collections::BTreeSet;

/// 依規則為每個區域建立基礎資料
pub fn build_baseline(registry: &RegionRegistry, rules: &Rules) -> StateDataMap {
    let restricted = normalized(&rules.restricted);
    let alternate = normalized(&rules.alternate_carrier);
    let large_group = normalized(&rules.large_group_101);
    let default_carrier = rules
        .default_carrier
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(CarrierKind::Default.tag());

    registry
        .codes()
        .map(|code| {
            let mut record = RegionRecord::default();
            merge_over(&mut record, &rules.defaults);

            let carrier = if restricted.contains(code) {
                CarrierKind::Restricted.tag()
            } else if alternate.contains(code) {
                CarrierKind::Both.tag()
            } else {
                default_carrier
            };
            record.carrier = Some(carrier.to_string());
            record.large_group_threshold = Some(if large_group.contains(code) {
                LargeGroupThreshold::Higher
            } else {
                LargeGroupThreshold::Lower
            });

            (code.to_string(), record)
        })
        .collect()
}

fn normalized(codes: &BTreeSet<String>) -> BTreeSet<String> {
    codes.iter().map(|c| normalize_code(c)).collect()
}
