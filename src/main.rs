mod cli;
mod db;
mod editor;
mod ipc;
mod labels;
mod llm;
mod logging;
mod outline;
mod store;

use clap::Parser;
use cli::{Cli, Command, LogFormatArg};
use llm::check::run_connection_check;
use llm::{LlmClient, LlmConfig};
use logging::{init_logging, LogConfig, LogFormat};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = match cli.log_format {
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_format(format));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            serve();
            ExitCode::SUCCESS
        }
        Command::CheckLlm { url, model } => check_llm(url, model),
    }
}

fn serve() {
    let mut state = ipc::AppState::default();
    info!(version = env!("CARGO_PKG_VERSION"), "sidecar started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            Err(e) => ipc::bad_json(e.to_string()),
        };
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    info!("stdin closed, exiting");
}

fn check_llm(url: Option<String>, model: Option<String>) -> ExitCode {
    let config = LlmConfig::from_env().with_cli_overrides(url, model);
    let client = match LlmClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "could not build HTTP client");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut stdout = io::stdout().lock();
    match run_connection_check(&client, &mut stdout) {
        Ok(outcome) if outcome.connected => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
