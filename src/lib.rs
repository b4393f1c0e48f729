//! Core library entry for the `scribe` CLI.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod completion;
pub mod config;
pub mod context;
pub mod logging;
pub mod ports;
pub mod store;

#[cfg(test)]
mod test_support;

use std::env;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::debug;

use crate::adapters::live::LiveFileSystem;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::store::ContentStore;

/// Run the CLI with the provided arguments.
///
/// Loads `.env`, checks the credential, resolves configuration, and runs
/// the interactive menu until the operator exits.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, the credential is
/// missing, configuration is invalid, or the menu cannot be shown.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };

    dotenvy::dotenv().ok();
    let api_key = config::credential(|name| env::var(name).ok()).map_err(|e| e.to_string())?;
    logging::init(cli.verbose);

    let config = Config::load(&LiveFileSystem, &cli.root)
        .map_err(|e| e.to_string())?
        .with_env(|name| env::var(name).ok())
        .with_overrides(cli.model.as_deref(), cli.editor.as_deref());
    debug!(model = %config.model, root = %cli.root.display(), "configuration resolved");

    let ctx = ServiceContext::live(&config, &api_key, cli.transcript);
    let store = ContentStore::new(&ctx, &config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;
    runtime.block_on(commands::run_menu(&ctx, &store)).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_help() {
        assert!(run(["scribe", "--help"]).is_ok());
    }

    #[test]
    fn run_errors_on_unknown_flag() {
        let err = run(["scribe", "--bogus"]).unwrap_err();
        assert!(err.contains("--bogus"));
    }
}
