//! barback CLI
//!
//! Command-line interface for converting cocktail spreadsheets into a JSON
//! catalog and inspecting the result.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

pub(crate) use error::CliError;

use cli_types::{Cli, Commands, ConfigAction};

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logger(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let settings_path = cli
        .config
        .clone()
        .unwrap_or_else(barback_catalog::settings_path);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            stdout,
            generated_at,
            strict,
            overrides,
        } => commands::convert::run_convert(
            &settings_path,
            &input,
            (!stdout).then_some(output.as_path()),
            generated_at.as_deref(),
            strict,
            &overrides,
        ),
        Commands::Inspect { input, only } => {
            commands::inspect::run_inspect(&settings_path, &input, only.as_deref())
        }
        Commands::Check { catalog } => commands::check::run_check(&catalog),
        Commands::Stats { catalog, top } => commands::stats::run_stats(&catalog, top),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings_path),
            ConfigAction::Path => commands::config::run_config_path(&settings_path),
            ConfigAction::Init { force } => commands::config::run_config_init(&settings_path, force),
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
