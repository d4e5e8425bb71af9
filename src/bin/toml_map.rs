use anyhow::Context;
use carrier_map::config::toml_config::TomlConfig;
use carrier_map::core::ConfigProvider;
use carrier_map::utils::error::ErrorSeverity;
use carrier_map::utils::validation::{is_remote, Validate};
use carrier_map::utils::logger;
use carrier_map::{CarrierPipeline, LocalStorage, MapEngine};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-map")]
#[command(about = "Carrier map export driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "carrier-map.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override display.hide_alternate from config
    #[arg(long)]
    hide_alternate: Option<bool>,

    /// Dry run - show what would be loaded without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based carrier map export");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    // 命令列覆蓋設定
    if let Some(hide) = args.hide_alternate {
        config
            .display
            .get_or_insert_with(Default::default)
            .hide_alternate = Some(hide);
        tracing::info!("🔧 hideAlternate overridden to: {}", hide);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No documents will be fetched");
        perform_dry_run(&config);
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = CarrierPipeline::new(storage, config);
    let engine = MapEngine::new(pipeline);

    match engine.run().await {
        Ok(outcome) => {
            println!("✅ Carrier map exported successfully!");
            println!("📁 Output saved to: {}", outcome.output_path);
            println!(
                "🗺️  {} regions resolved, {} important",
                outcome.state.states.len(),
                outcome.state.important_codes().len()
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Carrier map failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Map: {} v{}", config.map.name, config.map.version);
    if let Some(description) = &config.map.description {
        println!("  Description: {}", description);
    }
    println!("  App config: {}", config.app_config_source());
    println!("  State data: {}", config.state_data_source());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));
    println!("  Bundle: {}", config.is_bundled());
    println!("  Timeout: {}s", config.timeout_seconds());

    if let Some(hide) = config.hide_alternate_override() {
        println!("  Hide alternate: {}", hide);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Document Sources:");
    for (document, source) in [
        ("appConfig.json", config.app_config_source()),
        ("stateData.json", config.state_data_source()),
    ] {
        let kind = if is_remote(source) { "HTTP GET" } else { "local file" };
        println!("  {}: {} ({})", document, source, kind);
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Path: {}", config.output_path());
    if config.is_bundled() {
        println!("  Compression: carrier_map.zip (ZIP)");
    } else {
        for format in &config.output.formats {
            println!("  File: states.{}", format);
        }
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
