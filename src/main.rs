use clap::Parser;
use favorites_presenter::utils::error::ErrorSeverity;
use favorites_presenter::utils::{logger, validation::Validate};
use favorites_presenter::{CliConfig, ScenarioConfig, ScenarioRunner};

// 重播依賴 yield 讓訂閱任務執行，必須使用單執行緒 runtime
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting favorites-presenter replay");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證命令列參數
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 載入情境
    let mut scenario = match ScenarioConfig::from_file(&config.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("❌ Failed to load scenario '{}': {}", config.scenario, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    config.apply_overrides(&mut scenario);

    if let Err(e) = scenario.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    match ScenarioRunner::new(scenario).run().await {
        Ok(report) => {
            if config.json {
                println!("{}", report.to_json()?);
            } else {
                println!("✅ Replayed {} events", report.events_replayed);
                println!("📋 {} view commands issued", report.commands.len());
                println!("🗑️  {} favorites removed", report.removed_favorites.len());
                println!("👀 {} cards marked seen", report.seen_cards.len());
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Replay failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
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
