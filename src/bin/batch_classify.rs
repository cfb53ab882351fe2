use clap::Parser;
use nepali_news_classifier::config::toml_config::TomlConfig;
use nepali_news_classifier::domain::ports::ConfigProvider;
use nepali_news_classifier::utils::{logger, validation::Validate};
use nepali_news_classifier::{
    ArtifactLoader, BatchEngine, BatchPipeline, LocalFileStore, PredictionService,
};

#[derive(Parser)]
#[command(name = "batch-classify")]
#[command(about = "Batch Nepali news classification with TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "batch-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs instead of the compact format
    #[arg(long)]
    json_logs: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override max_records setting from config
    #[arg(long)]
    max_records: Option<usize>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting batch news classification");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(max_records) = args.max_records {
        config.input.max_records = Some(max_records);
        tracing::info!("🔧 max_records overridden to: {}", max_records);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    // 顯示配置摘要
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No model loading or classification will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    // 決定監控設定
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 載入模型（每個行程一次）
    let store = LocalFileStore::new(".".to_string());
    let loader = ArtifactLoader::new(store.clone());

    let classifier = match loader.load(&config).await {
        Ok(classifier) => classifier,
        Err(e) => {
            tracing::error!("❌ Model loading failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(3);
        }
    };

    // 建立分類服務與批次管道
    let service = PredictionService::new(classifier, config.min_input_chars());
    let pipeline = BatchPipeline::new(store, service, config);

    // 建立引擎並運行
    let engine = BatchEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Batch classification completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Batch classification completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Batch classification failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            // 輸出用戶友好的錯誤信息
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                nepali_news_classifier::utils::error::ErrorSeverity::Low => 0,
                nepali_news_classifier::utils::error::ErrorSeverity::Medium => 2,
                nepali_news_classifier::utils::error::ErrorSeverity::High => 1,
                nepali_news_classifier::utils::error::ErrorSeverity::Critical => 3,
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
    println!("  Job: {} v{}", config.job.name, config.job.version);
    println!("  Model: {}", config.classifier_path());
    println!("  Input: {} (column: {})", config.input.path, config.text_column());
    println!("  Output: {}/{}", config.output.path, config.output_filename());
    println!(
        "  Input policy: {}-{} characters",
        config.min_input_chars(),
        config.max_input_chars()
    );

    if let Some(max_records) = config.max_records() {
        println!("  Max Records: {}", max_records);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("🧠 Model Artifacts:");
    if config.classifier_path().ends_with(".zip") {
        println!("  Bundle: {} (classifier.json + labels.json inside)", config.classifier_path());
    } else {
        println!("  Classifier: {}", config.classifier_path());
        println!("  Labels: {}", config.labels_path());
    }

    println!();
    println!("📡 Input:");
    println!("  File: {}", config.input.path);
    println!("  Text column: {}", config.text_column());
    if let Some(id_column) = config.id_column() {
        println!("  Id column: {}", id_column);
    } else {
        println!("  Id column: (row numbers)");
    }
    if let Some(max) = config.max_records() {
        println!("  📊 Max records limit: {}", max);
    }

    println!();
    println!("💾 Output:");
    println!("  Path: {}/{}", config.output.path, config.output_filename());
    if config.skipped_report_enabled() {
        println!("  ✅ Skipped-rows report enabled (skipped.json)");
    }
    if config.fail_on_prediction_error() {
        println!("  ⚠️ Prediction errors abort the whole batch");
    } else {
        println!("  Prediction errors skip the row and continue");
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
