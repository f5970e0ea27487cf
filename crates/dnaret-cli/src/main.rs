//! dnaret CLI - Main entry point

use clap::Parser;
use dnaret_cli::config::Config;
use dnaret_cli::{Cli, Commands};
use dnaret_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Verbose: debug to stderr; otherwise warnings and errors only
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("dnaret")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> dnaret_cli::Result<()> {
    // Config errors reach the interactive driver, which reports them itself
    let config = Config::from_env().map(|config| config.with_args(&cli.connection));

    match cli.command {
        None | Some(Commands::Retrieve) => dnaret_cli::commands::retrieve::run(config).await,

        Some(Commands::List) => dnaret_cli::commands::list::run(&config?).await,

        Some(Commands::Fetch {
            ref file_name,
            ref output,
        }) => dnaret_cli::commands::fetch::run(&config?, file_name, output.as_deref()).await,

        Some(Commands::Config) => dnaret_cli::commands::config::show(&config?).await,
    }
}
