use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use barback_catalog::{load_catalog, validate_catalog};

use crate::CliError;

/// Validate an existing catalog file. Fails when any check does.
pub(crate) fn run_check(path: &Path) -> Result<(), CliError> {
    let catalog = load_catalog(path)?;
    let violations = validate_catalog(&catalog);

    if violations.is_empty() {
        log::info!(
            "{} {}: {} cocktails, {} ingredients, no problems found",
            "\u{2714}".if_supports_color(Stderr, |t| t.green()),
            path.display().if_supports_color(Stderr, |t| t.cyan()),
            catalog.cocktails.len(),
            catalog.ingredient_count(),
        );
        return Ok(());
    }

    for violation in &violations {
        log::warn!("  {}", violation);
    }
    Err(CliError::validation(format!(
        "{} problem(s) in {}",
        violations.len(),
        path.display()
    )))
}
