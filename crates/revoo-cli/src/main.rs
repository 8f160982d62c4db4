//! Revoo CLI - habits, weekly goals and progress records from the terminal.
//!
//! Every subcommand runs one flow against the Revoo backend through a
//! single `ApiClient`, built at startup with the configured token store.

mod cli;
mod commands;
mod prompt;
mod render;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use revoo_core::{ApiClient, Config, TokenBackend};

use cli::Cli;
use commands::Output;

/// Initialize the tracing subscriber for logging.
/// The returned guard flushes the log file on drop.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(io::stderr);

    let Some(path) = log_file else {
        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(filter)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file, got {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(filter)
        .init();
    Ok(Some(guard))
}

/// Command-line flags win over the config file and environment
fn apply_flags(config: &mut Config, api_url: Option<String>, ephemeral: bool) {
    if let Some(url) = api_url {
        config.base_url = url;
    }
    if ephemeral {
        config.token_backend = TokenBackend::Memory;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _guard = match init_tracing(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("revoo starting");

    let mut base_url = None;
    let result = run(cli, &mut base_url).await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", commands::describe_error(&err, base_url.as_deref()));
            ExitCode::FAILURE
        }
    }
}

async fn run(mut cli: Cli, base_url: &mut Option<String>) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    apply_flags(&mut config, cli.api_url.take(), cli.ephemeral);

    let store = config
        .token_store()
        .context("Failed to set up token storage")?;
    let client = ApiClient::new(&config, store)?;
    *base_url = Some(client.base_url().to_string());

    let out = Output { json: cli.json };
    commands::run(cli.command, &client, &config, out).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        apply_flags(&mut config, Some("http://10.0.2.2:8080/api".to_string()), true);
        assert_eq!(config.base_url, "http://10.0.2.2:8080/api");
        assert_eq!(config.token_backend, TokenBackend::Memory);

        let mut config = Config {
            token_backend: TokenBackend::Keyring,
            ..Config::default()
        };
        apply_flags(&mut config, None, false);
        assert_eq!(config.token_backend, TokenBackend::Keyring);
        assert_eq!(config.base_url, revoo_core::config::DEFAULT_BASE_URL);
    }
}
