use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use barback_catalog::{
    ConvertReport, RowKind, convert_rows, read_rows_from_path, to_json_string, validate_catalog,
    write_catalog,
};

use crate::CliError;
use crate::cli_types::ConvertOverrides;

/// Convert a spreadsheet export into a catalog.
///
/// `output` of `None` prints the catalog to stdout.
pub(crate) fn run_convert(
    settings_path: &Path,
    input: &Path,
    output: Option<&Path>,
    generated_at: Option<&str>,
    strict: bool,
    overrides: &ConvertOverrides,
) -> Result<(), CliError> {
    let options = super::resolve_options(settings_path, overrides)?;
    let generated_at = resolve_date(generated_at)?;

    if !input.exists() {
        return Err(CliError::other(format!(
            "Input file not found: {}",
            input.display()
        )));
    }

    log::debug!("Reading {}", input.display());
    let rows = read_rows_from_path(input)?;
    let conversion = convert_rows(&rows, &options)?;
    log_report(&conversion.report);

    if strict && conversion.report.has_warnings() {
        return Err(CliError::validation(format!(
            "{} warning(s) recorded; nothing written (--strict)",
            conversion.report.warnings.len()
        )));
    }

    let catalog = conversion.into_catalog(generated_at);
    let violations = validate_catalog(&catalog);
    if !violations.is_empty() {
        for violation in &violations {
            log::error!("  {}", violation);
        }
        return Err(CliError::validation(format!(
            "converted catalog has {} problem(s)",
            violations.len()
        )));
    }

    let destination = match output {
        Some(path) => {
            write_catalog(path, &catalog)?;
            path.display().to_string()
        }
        None => {
            let json = to_json_string(&catalog)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
            "stdout".to_string()
        }
    };

    log::info!(
        "{} Wrote {} cocktails ({} ingredients) to {}",
        "\u{2714}".if_supports_color(Stderr, |t| t.green()),
        catalog.cocktails.len().if_supports_color(Stderr, |t| t.bold()),
        catalog.ingredient_count(),
        destination.if_supports_color(Stderr, |t| t.cyan()),
    );

    Ok(())
}

/// Validate a `--generated-at` value, or use today's local date.
fn resolve_date(generated_at: Option<&str>) -> Result<String, CliError> {
    match generated_at {
        Some(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(|date| date.format("%Y-%m-%d").to_string())
            .map_err(|_| {
                CliError::other(format!(
                    "Invalid --generated-at '{}': expected YYYY-MM-DD",
                    text
                ))
            }),
        None => Ok(Local::now().date_naive().format("%Y-%m-%d").to_string()),
    }
}

fn log_report(report: &ConvertReport) {
    let columns: Vec<&str> = report.columns.iter().map(|f| f.as_str()).collect();
    log::debug!(
        "Header at line {} with columns: {}",
        report.header_line,
        columns.join(", ")
    );
    for kind in RowKind::ALL {
        log::debug!("  {:<16} {:>6}", kind.as_str(), report.count(kind));
    }

    log::info!(
        "Read {} rows: {} cocktail rows, {} ingredient rows, {} garnish rows",
        report.rows_read,
        report.count(RowKind::Header),
        report.count(RowKind::Ingredient),
        report.count(RowKind::Garnish),
    );
    if report.orphan_rows > 0 {
        log::warn!(
            "{} row(s) had no current cocktail and were skipped",
            report.orphan_rows
        );
    }
    if report.malformed_amounts > 0 {
        log::warn!(
            "{} amount(s) could not be parsed and were left empty",
            report.malformed_amounts
        );
    }

    if report.has_warnings() {
        log::warn!("{} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            log::warn!("  {}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_date() {
        assert_eq!(resolve_date(Some("2024-03-09")).unwrap(), "2024-03-09");
        assert_eq!(resolve_date(Some(" 2024-3-9 ")).unwrap(), "2024-03-09");
        assert!(resolve_date(Some("March 9")).is_err());
        assert!(resolve_date(Some("2024-02-30")).is_err());
        assert_eq!(resolve_date(None).unwrap().len(), 10);
    }
}
