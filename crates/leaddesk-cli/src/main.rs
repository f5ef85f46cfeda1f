//! LeadDesk CLI - triage leads and administer projects from the terminal.
//!
//! Each invocation restores the stored session, runs one command through
//! the same route guard the web client uses, and then applies whatever
//! navigation the session requested (for example a forced logout after
//! the server rejected the token).

mod app;
mod cli;
mod commands;
mod render;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use cli::{Cli, Command};
use leaddesk_core::Config;

/// Initialize the tracing subscriber.
///
/// Logs go to stderr unless a log file is given, so table and JSON output
/// on stdout stay clean. The returned guard must live until exit.
fn init_tracing(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // RUST_LOG controls the level (e.g. RUST_LOG=leaddesk_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("Invalid log file path: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let _log_guard = match init_tracing(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    info!("LeadDesk CLI starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let app = App::new(config, cli.api_url, cli.json)?;

    app.bootstrap().await;
    let needs_session = !matches!(
        cli.command,
        Command::Login { .. } | Command::Logout | Command::Config(_)
    );
    if let Err(e) = app.settle() {
        if needs_session {
            return Err(e);
        }
    }

    let result = commands::run(&app, cli.command).await;

    // A rejected token surfaces as a forced logout; report that instead of
    // the request error that triggered it.
    app.settle()?;
    result
}
