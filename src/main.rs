//! netdiag - one-shot network diagnostics for a single host
//!
//! Prints a report with ping statistics, DNS lookup results and TCP port
//! reachability. Probe failures are part of the report; only invalid
//! configuration ends the run with a non-zero exit status.

use clap::Parser;
use host_diagnostics::{
    cli::Cli,
    config::{display_config_summary, load_config},
    error::{AppError, Result},
    logging::LoggerFactory,
    output::{OutputCoordinator, OutputFormatterFactory},
    NetworkDiagnostics, PKG_NAME, TARGET_TRIPLE, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();
    let use_color = cli.use_colors();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    cli.validate().map_err(AppError::validation)?;

    let config = load_config(cli)?;
    let loggers = LoggerFactory::new(config.clone());
    let logger = loggers.create_logger("MAIN");

    logger
        .debug(&format!("{} v{} ({})", PKG_NAME, VERSION, TARGET_TRIPLE))
        .field("session_id", loggers.session_id())
        .log();
    logger
        .debug(&format!("Configuration:\n{}", display_config_summary(&config)))
        .log();

    let diagnostics = NetworkDiagnostics::from_config(&config, &loggers)?;
    let report = diagnostics.run_diagnostics(&config.host, &config.ports).await;

    let formatter = OutputFormatterFactory::create_formatter(config.output_format, config.enable_color);
    let coordinator = OutputCoordinator::new(formatter).with_summary(config.verbose);
    println!("{}", coordinator.display_report(&report)?);

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    eprintln!();
    eprintln!("Suggestion: {}", error.suggestion());

    if matches!(error, AppError::Config(_) | AppError::Validation(_)) {
        eprintln!("  - Ports must be between 1 and 65535");
        eprintln!("  - --count accepts 1-100, --timeout accepts 1-60 seconds");
        eprintln!("  - DNS servers must be IP addresses (e.g. 1.1.1.1)");
        eprintln!("  - The host must not start with '-'");
    }
}
