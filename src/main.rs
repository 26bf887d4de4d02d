use clap::Parser;
use colored::Colorize;
use csvjson::config::Command;
use csvjson::core::LoadOutcome;
use csvjson::utils::error::ErrorSeverity;
use csvjson::utils::logger;
use csvjson::{
    CliConfig, ConversionEngine, ConversionSettings, CsvJsonError, CsvJsonPipeline, LocalStorage,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    let Command::Parse(args) = cli.command;

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    let settings = match ConversionSettings::from_args(&args) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = CsvJsonPipeline::new(LocalStorage::current_dir(), settings);
    let engine = ConversionEngine::new_with_monitoring(pipeline, args.monitor);

    match engine.run().await {
        Ok(LoadOutcome::Written { path, records }) => {
            println!("{} {} records to {}", "✅ Saved".green(), records, path);
        }
        Ok(LoadOutcome::Printed { .. }) => {}
        Err(e) => exit_with(&e),
    }
}

fn exit_with(error: &CsvJsonError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::debug!("💡 Recovery suggestion: {}", error.recovery_suggestion());

    eprintln!("{}", error.user_friendly_message().red());
    eprintln!("💡 {}", error.recovery_suggestion().yellow());

    let exit_code = match error.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
