//! CLI entry point for slidescript.

mod cli;
mod commands;
mod output;

use std::path::Path;

use clap::Parser;
use slidescript_core::PipelineError;
use slidescript_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load env files without overriding variables that are already set.
/// Order: 1) ~/.slidescript/env  2) nearest .env from the current directory upwards
///
/// Returns one warning per file that could not be loaded.
fn load_env_files() -> Vec<String> {
    let mut candidates = Vec::new();
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".slidescript").join("env");
        if config_path.exists() {
            candidates.push(config_path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(find_upwards(&cwd, ".env"));
    }
    candidates
        .iter()
        .filter_map(|path| load_env_file(path))
        .collect()
}

fn load_env_file(path: &Path) -> Option<String> {
    dotenvy::from_path(path)
        .err()
        .map(|e| format!("ignoring {}: {e}", path.display()))
}

fn find_upwards(start: &Path, name: &str) -> Option<std::path::PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(env!("CARGO_PKG_VERSION"));
    if verbose {
        config = config.with_log_level("debug");
    } else if config.log_level.is_none() {
        // Keep stderr quiet unless asked; stdout carries the command output
        config = config.with_log_level("warn");
    }
    if let Err(e) = slidescript_observability::init(config) {
        output::warning(&format!("logging disabled: {e}"));
    }
}

fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PipelineError>() {
        // Pipeline messages already embed their cause
        Some(pipeline) => format!("[{}] {pipeline}", pipeline.code()),
        None => format!("{err:#}"),
    }
}

#[tokio::main]
async fn main() {
    let env_warnings = load_env_files();
    let cli = Cli::parse();
    output::init(cli.output_format);
    for warning in &env_warnings {
        output::warning(warning);
    }
    init_logging(cli.verbose);

    let outcome = commands::handle(cli).await;
    slidescript_observability::shutdown();

    if let Err(e) = outcome {
        output::error(&describe_error(&e));
        std::process::exit(1);
    }
}
