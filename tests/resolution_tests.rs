use carrier_map::core::state::Surface;
use carrier_map::domain::documents::LoadedDocuments;
use carrier_map::{
    build_baseline, classify, default_field_descriptors, project, resolve, CarrierKind, DisplayConfig,
    FieldValue, FilterSet, LargeGroupThreshold, MapState, OverrideSet, Region, RegionRecord,
    RegionRegistry, Rules, StateConfig,
};

fn state_config(value: serde_json::Value) -> StateConfig {
    serde_json::from_value(value).unwrap()
}

fn resolve_us(value: serde_json::Value) -> MapState {
    let documents = LoadedDocuments {
        app: Default::default(),
        state: state_config(value),
    };
    MapState::build(documents, RegionRegistry::us_states())
}

#[test]
fn test_every_registry_region_has_a_carrier() {
    let state = resolve_us(serde_json::json!({
        "rules": {
            "alternateCarrier": ["TX"],
            "restricted": ["HI"]
        },
        "notableStates": { "NY": { "coverageNotes": "notes only" } }
    }));

    for region in state.registry.regions() {
        let record = state.record(&region.code).unwrap();
        assert!(record.carrier().is_some(), "{} has no carrier", region.code);
    }
    assert_eq!(state.states.len(), 51);
}

#[test]
fn test_resolution_is_idempotent() {
    let config = state_config(serde_json::json!({
        "rules": { "defaultCarrier": "Default", "largeGroup101": ["CA"] },
        "restrictedStates": { "HI": { "coverageNotes": "a" } },
        "importantStates": { "CA": { "salesNotes": "b" } },
        "notableStates": { "CA": { "salesNotes": "c" } }
    }));
    let registry = RegionRegistry::us_states();
    let overrides = OverrideSet::from_state_config(&config);

    let first = resolve(build_baseline(&registry, &config.rules), &overrides);
    let second = resolve(build_baseline(&registry, &config.rules), &overrides);
    assert_eq!(first, second);

    // 重複套用同一組覆寫不改變結果
    assert_eq!(resolve(first.clone(), &overrides), first);
}

#[test]
fn test_notable_patch_wins_over_restricted_patch() {
    let state = resolve_us(serde_json::json!({
        "restrictedStates": { "WA": { "coverageNotes": "restricted note", "salesNotes": "kept" } },
        "notableStates": { "WA": { "coverageNotes": "notable note" } }
    }));

    let wa = state.record("WA").unwrap();
    assert_eq!(wa.carrier(), Some("Restricted"));
    assert_eq!(wa.get("coverageNotes"), Some(FieldValue::text("notable note")));
    assert_eq!(wa.get("salesNotes"), Some(FieldValue::text("kept")));
}

#[test]
fn test_notable_carrier_overrides_forced_restricted() {
    let state = resolve_us(serde_json::json!({
        "restrictedStates": { "WA": {} },
        "notableStates": { "WA": { "carrier": "Both" } }
    }));

    assert_eq!(state.record("WA").unwrap().carrier(), Some("Both"));
    assert_eq!(state.classify("WA").kind, CarrierKind::Both);
}

#[test]
fn test_important_layer_sets_flag_and_card_marker() {
    let state = resolve_us(serde_json::json!({
        "importantStates": { "ca": { "coverageNotes": "Dental riders" } }
    }));

    assert!(state.record("CA").unwrap().important);
    let card = state.card("CA", Surface::Detail).unwrap();
    assert_eq!(card.title, "California (CA) *");
    assert_eq!(card.fields[2].value, "Dental riders");
}

#[test]
fn test_unknown_region_in_notable_layer_is_tolerated() {
    let registry = RegionRegistry::new(vec![Region::new("A", "Alpha", 1), Region::new("B", "Beta", 2)]);
    let config = state_config(serde_json::json!({
        "rules": { "defaultCarrier": "Default", "largeGroup101": ["A"], "restricted": ["B"] },
        "notableStates": { "C": { "coverageNotes": "X" } }
    }));

    let baseline = build_baseline(&registry, &config.rules);
    assert_eq!(baseline["A"].carrier(), Some("Default"));
    assert_eq!(baseline["A"].large_group_threshold, Some(LargeGroupThreshold::Higher));
    assert_eq!(baseline["B"].carrier(), Some("Restricted"));
    assert_eq!(baseline["B"].large_group_threshold, Some(LargeGroupThreshold::Lower));

    let resolved = resolve(baseline, &OverrideSet::from_state_config(&config));
    let c = &resolved["C"];
    assert_eq!(c.carrier(), None);
    assert_eq!(c.get("coverageNotes"), Some(FieldValue::text("X")));
}

#[test]
fn test_hidden_both_collapses_into_default() {
    let display = DisplayConfig {
        hide_alternate: true,
        ..Default::default()
    };
    assert_eq!(classify(Some("Both"), &display), classify(Some("Default"), &display));
    assert_eq!(classify(Some("Mystery"), &display).kind, CarrierKind::Default);
    assert_eq!(classify(None, &display).kind, CarrierKind::Default);
}

#[test]
fn test_projection_of_carrier_only_record() {
    let fields = project(
        &RegionRecord::with_carrier("Default"),
        &default_field_descriptors(),
        &DisplayConfig::default(),
    );

    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].label, "Primary Carrier");
    assert_eq!(fields[0].value, "Default");
    assert!(fields[0].show_color);
}

#[test]
fn test_filter_and_search_share_classification() {
    let state = resolve_us(serde_json::json!({
        "rules": { "alternateCarrier": ["TX", "FL"], "restricted": ["HI"] },
        "importantStates": { "FL": {} }
    }));

    let both_only = FilterSet::parse(&["both".to_string()]);
    assert_eq!(state.filtered_codes(&both_only), vec!["TX"]);

    let both_with_important = FilterSet::parse(&["both".to_string(), "important".to_string()]);
    assert_eq!(state.filtered_codes(&both_with_important), vec!["FL", "TX"]);

    assert_eq!(state.search("hawa").unwrap().code, "HI");
    assert_eq!(state.fill_color("HI"), CarrierKind::Restricted.default_color());
}

#[test]
fn test_rules_defaults_seed_every_region() {
    let rules: Rules = serde_json::from_value(serde_json::json!({
        "defaults": { "coverageNotes": "Standard coverage" }
    }))
    .unwrap();

    let baseline = build_baseline(&RegionRegistry::us_states(), &rules);
    assert!(baseline
        .values()
        .all(|r| r.get("coverageNotes") == Some(FieldValue::text("Standard coverage"))));
}
