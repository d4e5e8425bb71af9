use carrier_map::core::state::{FilterSet, MapState, Surface};
use carrier_map::domain::model::normalize_code;
use carrier_map::utils::error::{ErrorSeverity, MapError};
use carrier_map::utils::{logger, validation::Validate};
use carrier_map::{CarrierPipeline, CliConfig, LocalStorage, MapEngine};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting carrier-map CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let dry_run = config.dry_run;
    let state_query = config.state.clone();
    let search_query = config.search.clone();
    let filter_values = config.filter.clone();

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = CarrierPipeline::new(storage, config);
    let engine = MapEngine::new(pipeline);

    let result = if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        engine.initialize().await
    } else {
        engine.run().await.map(|outcome| {
            println!("✅ Carrier map exported successfully!");
            println!("📁 Output saved to: {}", outcome.output_path);
            outcome.state
        })
    };

    let state = match result {
        Ok(state) => state,
        Err(e) => exit_with(e),
    };

    print_summary(&state);

    if let Some(query) = state_query {
        // 代碼、FIPS 編號或州名皆可
        let code = state
            .registry
            .resolve_feature(Some(query.trim()), Some(query.trim()))
            .map(|region| region.code.clone())
            .unwrap_or_else(|| normalize_code(&query));
        print_card(&state, &code);
    }

    if let Some(query) = search_query {
        match state.search(&query) {
            Some(region) => {
                println!("🔎 '{}' matches {} ({})", query, region.name, region.code);
                print_card(&state, &region.code);
            }
            None => println!("🔎 No state matches '{}'", query),
        }
    }

    if !filter_values.is_empty() {
        let filter = FilterSet::parse(&filter_values);
        let codes = state.filtered_codes(&filter);
        println!("🧮 {} states pass the filter: {}", codes.len(), codes.join(", "));
    }

    Ok(())
}

fn print_summary(state: &MapState) {
    println!("🗺️  {}", state.app.title());
    if let Some(subtitle) = state.app.subtitle() {
        println!("   {}", subtitle);
    }
    println!("📋 Legend:");
    for entry in state.legend() {
        let count = state
            .registry
            .codes()
            .filter(|code| state.classify(code).kind == entry.kind)
            .count();
        println!("  {} {:<12} {} states", entry.color, entry.label, count);
    }

    let important = state.important_codes();
    if !important.is_empty() {
        println!("⭐ Important: {}", important.join(", "));
    }
    println!();
}

fn print_card(state: &MapState, code: &str) {
    match state.card(code, Surface::Detail) {
        Some(card) => {
            println!("📍 {}", card.title);
            for field in card.fields {
                if field.show_color {
                    println!("  {}: {} [{}]", field.label, field.value, card.color);
                } else {
                    println!("  {}: {}", field.label, field.value);
                }
            }
        }
        None => println!("📍 Unknown state code: {}", code),
    }
}

fn exit_with(e: MapError) -> ! {
    tracing::error!(
        "❌ Carrier map failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 依錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 網路錯誤，可重試
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
