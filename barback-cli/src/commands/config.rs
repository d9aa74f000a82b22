use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use barback_catalog::settings::{Settings, load_settings, save_settings};

use crate::CliError;

/// Show the effective settings and where they were loaded from.
pub(crate) fn run_config_show(path: &Path) -> Result<(), CliError> {
    log::info!(
        "{}",
        "barback Configuration".if_supports_color(Stderr, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(exists)".if_supports_color(Stderr, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stderr, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let settings = load_settings(path)?;
    let rendered = toml::to_string_pretty(&settings)
        .map_err(|e| CliError::config(format!("Cannot render settings: {}", e)))?;
    for line in rendered.lines() {
        log::info!("  {}", line);
    }

    if let Err(e) = settings.convert_options() {
        crate::log_blank();
        log::warn!("{}", e);
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path(path: &Path) -> Result<(), CliError> {
    println!("{}", path.display());
    Ok(())
}

/// Write a settings file holding the defaults.
pub(crate) fn run_config_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    save_settings(path, &Settings::default())?;
    log::info!(
        "{} Wrote default settings to {}",
        "\u{2714}".if_supports_color(Stderr, |t| t.green()),
        path.display().if_supports_color(Stderr, |t| t.cyan()),
    );
    Ok(())
}
