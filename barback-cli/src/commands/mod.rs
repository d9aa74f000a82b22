pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod convert;
pub(crate) mod inspect;
pub(crate) mod stats;

use std::path::Path;

use barback_catalog::ConvertOptions;
use barback_catalog::settings::{load_settings, parse_unit_setting};

use crate::CliError;
use crate::cli_types::ConvertOverrides;

/// Resolve conversion options: command-line flags, then the settings file,
/// then built-in defaults.
pub(crate) fn resolve_options(
    settings_path: &Path,
    overrides: &ConvertOverrides,
) -> Result<ConvertOptions, CliError> {
    let settings = load_settings(settings_path)?;
    let mut options = settings.convert_options()?;

    if let Some(prefix) = &overrides.prefix {
        options = options.id_prefix(prefix.trim());
    }
    if let Some(creator) = &overrides.creator {
        let creator = creator.trim();
        options = options.creator_name((!creator.is_empty()).then(|| creator.to_string()));
    }
    if let Some(unit) = &overrides.default_unit {
        let unit = parse_unit_setting(unit)
            .map_err(|_| CliError::config(format!("Unknown --default-unit '{}'", unit)))?;
        options = options.default_unit(unit);
    }
    if overrides.no_ml {
        options = options.convert_to_ml(false);
    }

    Ok(options)
}

/// Truncate a string to at most `max` characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Sort `(label, count)` pairs by descending count, then label.
pub(crate) fn rank<'a>(counts: impl IntoIterator<Item = (&'a str, usize)>) -> Vec<(&'a str, usize)> {
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}
