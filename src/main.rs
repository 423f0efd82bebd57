use chrono::Timelike;
use clap::Parser;
use ride_fare::app::commands;
use ride_fare::utils::{logger, validation::Validate};
use ride_fare::{CliConfig, FareConfig, FareError, FilePreferences, RuleStore};

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

fn run(cli: &CliConfig) -> Result<(), FareError> {
    cli.validate()?;

    let config = cli.apply_overrides(FareConfig::from_file_or_default(&cli.config)?);
    config.validate()?;

    let prefs_path = config.preferences_path();
    tracing::debug!(
        "📁 Preferences: {} (revision {})",
        prefs_path.display(),
        config.revision()
    );

    let mut store = RuleStore::open(FilePreferences::new(prefs_path), config.revision());
    let hour = chrono::Local::now().hour();

    let output = commands::execute(&cli.command, &mut store, config.currency_symbol(), hour)?;
    println!("{}", output);
    Ok(())
}
