use std::collections::HashMap;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use barback_catalog::{RowKind, classify_row, locate_header, read_rows_from_path};

use crate::CliError;
use crate::cli_types::ConvertOverrides;

use super::truncate_str;

/// Print the detected header and the classification of every data row.
pub(crate) fn run_inspect(
    settings_path: &Path,
    input: &Path,
    only: Option<&[String]>,
) -> Result<(), CliError> {
    let options = super::resolve_options(settings_path, &ConvertOverrides::default())?;
    let filter = only.map(parse_kinds).transpose()?;

    let rows = read_rows_from_path(input)?;
    let (header_index, columns) = locate_header(&rows, options.header_scan_rows)?;

    log::info!(
        "{}",
        format!("Header at line {}", rows[header_index].line)
            .if_supports_color(Stderr, |t| t.bold()),
    );
    for field in columns.fields() {
        if let Some(index) = columns.index(field) {
            log::info!("  {:<13} column {}", field.as_str(), index + 1);
        }
    }
    crate::log_blank();

    let mut counts: HashMap<RowKind, usize> = HashMap::new();
    for row in &rows[header_index + 1..] {
        let kind = classify_row(&columns, &row.cells);
        *counts.entry(kind).or_default() += 1;

        if let Some(kinds) = &filter
            && !kinds.contains(&kind)
        {
            continue;
        }

        let filled: Vec<&str> = row
            .cells
            .iter()
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .collect();
        log::info!(
            "{:>5}  {}  {}",
            row.line,
            paint_kind(kind),
            truncate_str(&filled.join(" | "), 80),
        );
    }

    crate::log_blank();
    log::info!("{}", "Row kinds".if_supports_color(Stderr, |t| t.bold()));
    for kind in RowKind::ALL {
        let count = counts.get(&kind).copied().unwrap_or(0);
        if count > 0 {
            log::info!("  {:<16} {:>6}", kind.as_str(), count);
        }
    }

    Ok(())
}

fn parse_kinds(names: &[String]) -> Result<Vec<RowKind>, CliError> {
    names
        .iter()
        .map(|name| {
            RowKind::from_str_loose(name)
                .ok_or_else(|| CliError::other(format!("Unknown row kind '{}'", name)))
        })
        .collect()
}

fn paint_kind(kind: RowKind) -> String {
    let label = format!("{:<15}", kind.as_str());
    match kind {
        RowKind::Header => label.if_supports_color(Stderr, |t| t.cyan()).to_string(),
        RowKind::Garnish => label.if_supports_color(Stderr, |t| t.green()).to_string(),
        RowKind::Note => label.if_supports_color(Stderr, |t| t.blue()).to_string(),
        RowKind::Noise => label.if_supports_color(Stderr, |t| t.yellow()).to_string(),
        RowKind::Blank | RowKind::Comment | RowKind::RepeatedHeader => {
            label.if_supports_color(Stderr, |t| t.dimmed()).to_string()
        }
        RowKind::Ingredient => label,
    }
}
