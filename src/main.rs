use clap::Parser;
use nepali_news_classifier::domain::model::Prediction;
use nepali_news_classifier::utils::error::ErrorSeverity;
use nepali_news_classifier::utils::monitor::SystemMonitor;
use nepali_news_classifier::utils::validation::truncate_to_chars;
use nepali_news_classifier::utils::{logger, validation::Validate};
use nepali_news_classifier::{ArtifactLoader, CliConfig, LocalFileStore, PredictionService};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting Nepali news category prediction demo");
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

    let monitor = SystemMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 模型只在啟動時載入一次，之後整個會話共享唯讀
    let store = LocalFileStore::new(".".to_string());
    let loader = ArtifactLoader::new(store);

    let classifier = match loader.load(&config).await {
        Ok(classifier) => classifier,
        Err(e) => {
            tracing::error!("❌ Model loading failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            // 模型載入失敗是致命錯誤，直接結束會話
            std::process::exit(3);
        }
    };
    monitor.log_stats("Model loaded");

    let max_input_chars = config.max_input_chars;
    let top_k = config.top_k;
    let service = PredictionService::new(classifier, config.min_input_chars);

    println!("✅ Model ready. Categories: {}", service.labels().join(", "));
    println!(
        "Paste a Nepali news text ({}-{} characters) and press Enter. Type :q to quit.",
        config.min_input_chars, config.max_input_chars
    );

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        stdout.write_all("\n📰 News text: ".as_bytes()).await?;
        stdout.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break, // EOF
        };

        if matches!(line.trim(), ":q" | ":quit" | "exit") {
            break;
        }

        // 長度上限屬於輸入邊界：超過就截斷再交給 service
        let text = truncate_to_chars(&line, max_input_chars);
        if text.len() < line.len() {
            println!("⚠️ Input truncated to {} characters", max_input_chars);
        }

        match service.classify(text) {
            Ok(prediction) => render_prediction(&prediction, top_k),
            Err(e) => {
                match e.severity() {
                    ErrorSeverity::Low => println!("⚠️ {}", e.user_friendly_message()),
                    _ => eprintln!("❌ {}", e.user_friendly_message()),
                }
                println!("💡 {}", e.recovery_suggestion());
            }
        }
    }

    monitor.log_final_stats();
    println!("👋 Bye!");

    Ok(())
}

fn render_prediction(prediction: &Prediction, top_k: usize) {
    println!("✅ Predicted category: {}", prediction.category);

    for score in prediction.top(top_k) {
        let bar = "█".repeat((score.percent / 5.0).round() as usize);
        println!("  {:<16} {:>5.1}% {}", score.category, score.percent, bar);
    }
}
