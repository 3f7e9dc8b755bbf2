use clap::Parser;
use exn::ResultExt;
use shelf_config::Config;
use shelf_storage::{BackendHandle, LocalBackend};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;

use crate::commands::Output;
use crate::error::{ErrorKind, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            err.exit_code()
        },
    }
}

async fn run(cli: cli::Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(library) = cli.library {
        config.library = library;
    }
    init_tracing(&config.log);

    let root = config.library_root().or_raise(|| ErrorKind::Config)?;
    let backend: BackendHandle = Arc::new(LocalBackend::new("local", root).map_err(ErrorKind::storage)?);
    let output = if cli.json { Output::Json } else { Output::Text };
    let mut stdout = tokio::io::stdout();
    commands::run_command(cli.command, output, backend.as_ref(), &mut stdout).await
}

/// Logs go to stderr; stdout carries listings and page bytes.
fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
