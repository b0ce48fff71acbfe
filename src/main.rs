use clap::Parser;
use kurs_kpi::utils::error::ErrorSeverity;
use kurs_kpi::utils::logger;
use kurs_kpi::{render_text, CliConfig, ConfiguredLoader, Dashboard, LoadOutcome, Report};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if cli.json_logs || config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting kurs-kpi for {}", config.dashboard.name);
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    let loader = ConfiguredLoader::from_config(&config)?;
    let dashboard = Dashboard::new(loader);

    match dashboard.reload().await {
        Ok(LoadOutcome::Applied(stats)) => {
            if config.output.format == "json" {
                println!("{}", serde_json::to_string_pretty(&Report::new(&stats))?);
            } else {
                print!("{}", render_text(&stats));
            }
        }
        Ok(LoadOutcome::Superseded {
            generation,
            current,
        }) => {
            tracing::debug!("Load cycle {} superseded by cycle {}", generation, current);
        }
        Err(e) => {
            tracing::error!(
                "❌ Loading dashboard failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());

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
