use anyhow::Context;
use clap::Parser;
use gistapi::utils::error::ErrorSeverity;
use gistapi::utils::logger;
use gistapi::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.json_logs);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "Configuration validation failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            eprintln!("error: {}", e);
            eprintln!("hint: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Critical => 1,
                _ => 2,
            };
            std::process::exit(exit_code);
        }
    };

    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    gistapi::run_server(config)
        .await
        .context("gistapi server terminated with an error")
}
