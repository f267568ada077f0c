#![forbid(unsafe_code)]

mod config;
mod constants;
mod launcher;
mod presentation;
mod shell_words;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use config::ConfigLoader;
use launcher::{HeadlessWindow, Launcher, LogDialog};

/// Clean, minimalist dock for launching your essential shortcuts
#[derive(Debug, Parser)]
#[command(name = "launchdock", version, about)]
struct Cli {
    /// Use this config file instead of the system and user layers, e.g. `/tmp/launchdock.yml`
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the resolved presentation config as JSON
    #[arg(long)]
    print: bool,
}

fn init_logging() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

async fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(path) = &cli.config {
        // An explicit path must exist; absence is only tolerated for discovered layers
        std::fs::metadata(path).with_context(|| format!("Cannot use config {}", path.display()))?;
    }

    let mut launcher = Launcher::new(ConfigLoader::system(), cli.config);
    let mut window = HeadlessWindow::default();
    launcher.startup(&mut window, &mut LogDialog).await;

    let config = launcher.config();
    if !config.valid {
        error!(version = launcher.app_version(), "Invalid config, quitting");
        return Ok(ExitCode::FAILURE);
    }
    info!(
        custom = ?launcher.custom_config_path(),
        shortcuts = config.shortcuts.len(),
        width = window.size.0,
        height = window.size.1,
        "Launcher ready"
    );

    if cli.print {
        let json = serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?;
        println!("{json}");
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = ?e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}
