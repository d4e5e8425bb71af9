use crate::core::classifier::Classification;
use crate::core::state::{LegendEntry, MapState, Surface};
use crate::domain::model::{FieldValue, RegionRecord, CARRIER_KEY};
use crate::utils::error::{MapError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const JSON_FILENAME: &str = "states.json";
pub const CSV_FILENAME: &str = "states.csv";
pub const BUNDLE_FILENAME: &str = "carrier_map.zip";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<&'a str>,
    footer: &'a str,
    generated_at: String,
    legend: Vec<LegendEntry>,
    territories: &'a BTreeMap<String, FieldValue>,
    states: BTreeMap<&'a str, ExportedRegion<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedRegion<'a> {
    name: &'a str,
    // 自由欄位可能與 name / color 同名，因此不攤平
    record: &'a RegionRecord,
    classification: Classification,
    color: &'a str,
}

/// 解析結果輸出為 JSON
pub fn to_json(state: &MapState) -> Result<String> {
    let states = state
        .states
        .iter()
        .map(|(code, record)| {
            let name = state
                .registry
                .by_code(code)
                .map(|r| r.name.as_str())
                .unwrap_or(code.as_str());
            (
                code.as_str(),
                ExportedRegion {
                    name,
                    record,
                    classification: state.classify(code),
                    color: state.fill_color(code),
                },
            )
        })
        .collect();

    let document = ExportDocument {
        title: state.app.title(),
        subtitle: state.app.subtitle(),
        footer: state.app.footer(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        legend: state.legend(),
        territories: &state.app.territories,
        states,
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

/// 解析結果輸出為 CSV；欄位依詳細面板的欄位清單
pub fn to_csv(state: &MapState) -> Result<String> {
    let descriptors: Vec<_> = state
        .field_descriptors(Surface::Detail)
        .into_iter()
        .filter(|d| d.key != CARRIER_KEY)
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![
        "code".to_string(),
        "name".to_string(),
        "carrier".to_string(),
        "carrier_label".to_string(),
        "color".to_string(),
        "important".to_string(),
    ];
    header.extend(descriptors.iter().map(|d| d.label.clone()));
    writer.write_record(&header)?;

    for (code, record) in &state.states {
        let classification = state.classify(code);
        let name = state
            .registry
            .by_code(code)
            .map(|r| r.name.as_str())
            .unwrap_or(code.as_str());

        let mut row = vec![
            code.clone(),
            name.to_string(),
            record.carrier().unwrap_or_default().to_string(),
            classification.label,
            state.fill_color(code).to_string(),
            record.important.to_string(),
        ];
        row.extend(descriptors.iter().map(|d| {
            record
                .get(&d.key)
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&row)?;
    }

    let bytes = writer.into_inner().map_err(|e| MapError::ProcessingError {
        message: format!("Failed to finish CSV output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| MapError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// 依要求的格式產生 (檔名, 內容)
pub fn render_outputs(state: &MapState, formats: &[String]) -> Result<Vec<(&'static str, String)>> {
    let mut outputs = Vec::new();
    for format in formats {
        match format.as_str() {
            "json" => outputs.push((JSON_FILENAME, to_json(state)?)),
            "csv" => outputs.push((CSV_FILENAME, to_csv(state)?)),
            other => tracing::warn!("🔶 Unsupported output format: {}", other),
        }
    }
    Ok(outputs)
}

/// 將多個輸出檔壓成一個 ZIP
pub fn bundle(outputs: &[(&str, String)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (filename, content) in outputs {
        zip.start_file(*filename, SimpleFileOptions::default())?;
        zip.write_all(content.as_bytes())?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
