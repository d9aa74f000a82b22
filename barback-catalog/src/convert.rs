//! Spreadsheet-to-catalog conversion.
//!
//! The conversion is one linear pass over the CSV rows:
//!
//! 1. Find the column header within the first few rows.
//! 2. Classify every following row ([`classify_row`]).
//! 3. Feed the row to the cocktail it belongs to. A row naming a cocktail
//!    makes that cocktail current; ingredient, garnish and note rows are
//!    appended to whichever cocktail is current.
//!
//! Cocktails are keyed by slug, so a drink whose rows are split across the
//! sheet is reassembled into one record, in order of first appearance.

use std::collections::{HashMap, HashSet};

use crate::classify::{RowKind, classify_row, garnish_text};
use crate::columns::{ColumnMap, Field};
use crate::error::CatalogError;
use crate::slug::{cocktail_id, slugify};
use crate::source::SourceRow;
use crate::types::{Catalog, Cocktail, Ingredient};
use crate::units::{Quantity, Unit, parse_amount, split_leading_amount};

/// Knobs for a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Prefix for cocktail ids (`<prefix>:<slug>`). Empty for bare slugs.
    pub id_prefix: String,
    /// Creator used when the sheet has no creator column or the cell is empty.
    pub creator_name: Option<String>,
    /// Unit assumed for bare numbers in the amount column.
    pub default_unit: Option<Unit>,
    /// Convert ounces and centiliters to milliliters.
    pub convert_to_ml: bool,
    /// An all-empty row closes the current cocktail.
    pub blank_row_ends_cocktail: bool,
    /// How many leading rows to search for the column header.
    pub header_scan_rows: usize,
    /// Tags added to every cocktail.
    pub default_tags: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            id_prefix: "deathandco".to_string(),
            creator_name: Some("Death & Co".to_string()),
            default_unit: Some(Unit::Oz),
            convert_to_ml: true,
            blank_row_ends_cocktail: true,
            header_scan_rows: 10,
            default_tags: Vec::new(),
        }
    }
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn creator_name(mut self, creator: Option<String>) -> Self {
        self.creator_name = creator;
        self
    }

    pub fn default_unit(mut self, unit: Option<Unit>) -> Self {
        self.default_unit = unit;
        self
    }

    pub fn convert_to_ml(mut self, convert: bool) -> Self {
        self.convert_to_ml = convert;
        self
    }

    pub fn blank_row_ends_cocktail(mut self, ends: bool) -> Self {
        self.blank_row_ends_cocktail = ends;
        self
    }

    pub fn header_scan_rows(mut self, rows: usize) -> Self {
        self.header_scan_rows = rows;
        self
    }

    pub fn default_tags(mut self, tags: Vec<String>) -> Self {
        self.default_tags = tags;
        self
    }
}

/// A problem found in a specific row. The row was still processed as far
/// as possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-based CSV line.
    pub line: u64,
    pub message: String,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Statistics from a conversion run.
#[derive(Debug, Clone, Default)]
pub struct ConvertReport {
    /// Rows read, including the header and anything above it.
    pub rows_read: usize,
    /// Line of the detected column header.
    pub header_line: u64,
    /// Fields resolved from the header.
    pub columns: Vec<Field>,
    kinds: HashMap<RowKind, usize>,
    /// Ingredient, garnish or note rows with no cocktail to attach to.
    pub orphan_rows: usize,
    /// Amount cells that could not be parsed (ingredient kept without quantity).
    pub malformed_amounts: usize,
    pub warnings: Vec<RowWarning>,
}

impl ConvertReport {
    /// Number of data rows classified as `kind`.
    pub fn count(&self, kind: RowKind) -> usize {
        self.kinds.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn record(&mut self, kind: RowKind) {
        *self.kinds.entry(kind).or_insert(0) += 1;
    }

    fn warn(&mut self, line: u64, message: impl Into<String>) {
        let warning = RowWarning {
            line,
            message: message.into(),
        };
        log::debug!("{warning}");
        self.warnings.push(warning);
    }
}

/// Result of [`convert_rows`].
#[derive(Debug, Clone)]
pub struct Conversion {
    pub cocktails: Vec<Cocktail>,
    pub report: ConvertReport,
}

impl Conversion {
    /// Wrap the cocktails in a catalog stamped with `generated_at`.
    pub fn into_catalog(self, generated_at: impl Into<String>) -> Catalog {
        Catalog::new(self.cocktails, generated_at)
    }
}

/// Find the column header among the first `scan_rows` rows.
///
/// Returns the header's index in `rows` and the resolved columns.
pub fn locate_header(
    rows: &[SourceRow],
    scan_rows: usize,
) -> Result<(usize, ColumnMap), CatalogError> {
    let scan_rows = scan_rows.max(1);
    let index = rows
        .iter()
        .take(scan_rows)
        .position(|row| ColumnMap::looks_like_header(&row.cells))
        .ok_or(CatalogError::HeaderNotFound(scan_rows))?;
    let columns = ColumnMap::from_header(&rows[index].cells)?;
    Ok((index, columns))
}

/// Convert CSV rows into cocktails.
///
/// Fails only when no usable header is found; every row-level problem is
/// recorded in the report instead.
pub fn convert_rows(
    rows: &[SourceRow],
    options: &ConvertOptions,
) -> Result<Conversion, CatalogError> {
    let (header_index, columns) = locate_header(rows, options.header_scan_rows)?;

    let mut scan = Scan::new(&columns, options);
    scan.report.rows_read = rows.len();
    scan.report.header_line = rows[header_index].line;
    scan.report.columns = columns.fields();

    if header_index > 0 {
        log::debug!("Skipped {header_index} row(s) above the column header");
    }

    for row in &rows[header_index + 1..] {
        scan.feed(row);
    }

    Ok(scan.finish())
}

// ── Scan state ──────────────────────────────────────────────────────────────

/// A cocktail being accumulated.
struct Draft {
    cocktail: Cocktail,
    /// Line of the row that introduced the cocktail.
    line: u64,
    creator_from_sheet: bool,
    garnishes: Vec<String>,
    notes: Vec<String>,
}

impl Draft {
    fn new(id: String, name: String, line: u64, options: &ConvertOptions) -> Self {
        let mut cocktail = Cocktail::new(id, name);
        cocktail.creator_name = options.creator_name.clone();
        for tag in &options.default_tags {
            push_tag(&mut cocktail.tags, tag);
        }
        Self {
            cocktail,
            line,
            creator_from_sheet: false,
            garnishes: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn add_garnish(&mut self, text: &str) {
        let text = collapse_whitespace(text);
        if text.is_empty() {
            return;
        }
        if !self.garnishes.iter().any(|g| g.eq_ignore_ascii_case(&text)) {
            self.garnishes.push(text);
        }
    }

    fn finish(self) -> Cocktail {
        let mut cocktail = self.cocktail;
        if !self.garnishes.is_empty() {
            cocktail.garnish = Some(self.garnishes.join(", "));
        }
        if !self.notes.is_empty() {
            let mut paragraphs: Vec<String> = cocktail.instructions.take().into_iter().collect();
            paragraphs.extend(self.notes);
            cocktail.instructions = Some(paragraphs.join("\n\n"));
        }
        cocktail
    }
}

struct Scan<'a> {
    columns: &'a ColumnMap,
    options: &'a ConvertOptions,
    drafts: Vec<Draft>,
    by_key: HashMap<String, usize>,
    ids: HashSet<String>,
    current: Option<usize>,
    report: ConvertReport,
}

impl<'a> Scan<'a> {
    fn new(columns: &'a ColumnMap, options: &'a ConvertOptions) -> Self {
        Self {
            columns,
            options,
            drafts: Vec::new(),
            by_key: HashMap::new(),
            ids: HashSet::new(),
            current: None,
            report: ConvertReport::default(),
        }
    }

    fn cell<'r>(&self, row: &'r SourceRow, field: Field) -> &'r str {
        self.columns.get(&row.cells, field)
    }

    fn feed(&mut self, row: &SourceRow) {
        let kind = classify_row(self.columns, &row.cells);
        self.report.record(kind);

        match kind {
            RowKind::Blank => {
                if self.options.blank_row_ends_cocktail {
                    self.current = None;
                }
            }
            RowKind::RepeatedHeader | RowKind::Comment => {}
            RowKind::Noise => {
                self.report
                    .warn(row.line, "ignored row with no cocktail name or ingredient");
            }
            RowKind::Header => {
                let idx = self.open_cocktail(row);
                self.current = Some(idx);
                self.apply_details(idx, row);
                if !self.cell(row, Field::Ingredient).is_empty() {
                    self.add_ingredient(idx, row);
                }
            }
            RowKind::Ingredient | RowKind::Garnish | RowKind::Note => {
                let Some(idx) = self.current else {
                    self.report.orphan_rows += 1;
                    self.report.warn(
                        row.line,
                        format!("{kind} row has no cocktail above it; skipped"),
                    );
                    return;
                };
                self.apply_details(idx, row);
                if kind != RowKind::Note && !self.cell(row, Field::Ingredient).is_empty() {
                    self.add_ingredient(idx, row);
                }
            }
        }
    }

    /// Make the cocktail named on `row` current, creating it on first sight.
    fn open_cocktail(&mut self, row: &SourceRow) -> usize {
        let name = collapse_whitespace(self.cell(row, Field::Name));
        let slug = slugify(&name);
        let key = if slug.is_empty() {
            format!("name:{}", name.to_lowercase())
        } else {
            slug
        };

        if let Some(&idx) = self.by_key.get(&key) {
            if self.current != Some(idx) {
                log::debug!("Reopening cocktail '{}' at line {}", name, row.line);
            }
            return idx;
        }

        let id = cocktail_id(&self.options.id_prefix, &name, self.drafts.len() + 1);
        let id = self.unique_id(id);
        log::debug!("New cocktail '{}' ({}) at line {}", name, id, row.line);
        let idx = self.drafts.len();
        self.drafts.push(Draft::new(id, name, row.line, self.options));
        self.by_key.insert(key, idx);
        idx
    }

    /// Claim `id`, suffixing `-2`, `-3`, ... when an earlier cocktail holds it.
    ///
    /// Distinct keys can mint the same id: an unsluggable name falls back to
    /// `cocktail-<n>`, which another drink's real slug may also produce.
    fn unique_id(&mut self, id: String) -> String {
        let mut candidate = id.clone();
        let mut n = 2;
        while self.ids.contains(&candidate) {
            candidate = format!("{id}-{n}");
            n += 1;
        }
        self.ids.insert(candidate.clone());
        candidate
    }

    /// Merge the per-cocktail columns of `row` into the draft.
    fn apply_details(&mut self, idx: usize, row: &SourceRow) {
        let glass = self.cell(row, Field::Glass);
        let garnish = self.cell(row, Field::Garnish);
        let instructions = self.cell(row, Field::Instructions);
        let creator = self.cell(row, Field::Creator);
        let story = self.cell(row, Field::Story);
        let tags = self.cell(row, Field::Tags);
        let is_note = self.cell(row, Field::Name).is_empty()
            && self.cell(row, Field::Ingredient).is_empty();

        let draft = &mut self.drafts[idx];
        let cocktail = &mut draft.cocktail;

        if cocktail.glass.is_none() && !glass.is_empty() {
            cocktail.glass = Some(collapse_whitespace(glass).to_lowercase());
        }
        if !instructions.is_empty() {
            if cocktail.instructions.is_none() {
                cocktail.instructions = Some(instructions.to_string());
            } else if is_note
                && cocktail.instructions.as_deref() != Some(instructions)
                && !draft.notes.iter().any(|n| n == instructions)
            {
                draft.notes.push(instructions.to_string());
            }
        }
        if !creator.is_empty() && !draft.creator_from_sheet {
            cocktail.creator_name = Some(collapse_whitespace(creator));
            draft.creator_from_sheet = true;
        }
        if cocktail.story.is_none() && !story.is_empty() {
            cocktail.story = Some(story.to_string());
        }
        for tag in tags.split([',', ';', '|']) {
            push_tag(&mut cocktail.tags, tag);
        }
        if !garnish.is_empty() {
            draft.add_garnish(garnish);
        }
    }

    fn add_ingredient(&mut self, idx: usize, row: &SourceRow) {
        let cell = self.cell(row, Field::Ingredient);

        if let Some(text) = garnish_text(cell) {
            self.drafts[idx].add_garnish(text);
            return;
        }

        let amount = self.cell(row, Field::Amount);
        let unit_hint = self.cell(row, Field::Unit);

        let (name, quantity) = if !amount.is_empty() {
            match parse_amount(amount, unit_hint, self.options.default_unit) {
                Ok(q) => (cell, q),
                Err(e) => {
                    self.report.malformed_amounts += 1;
                    self.report
                        .warn(row.line, format!("{e} for '{cell}'; quantity left empty"));
                    (cell, None)
                }
            }
        } else if let Some((q, rest)) = split_leading_amount(cell) {
            (rest, Some(q))
        } else {
            (cell, None)
        };

        let quantity = quantity.map(|q: Quantity| q.normalize(self.options.convert_to_ml));
        self.drafts[idx]
            .cocktail
            .ingredients
            .push(Ingredient::new(collapse_whitespace(name), quantity));
    }

    fn finish(mut self) -> Conversion {
        let mut cocktails = Vec::with_capacity(self.drafts.len());
        for draft in self.drafts {
            if draft.cocktail.ingredients.is_empty() {
                self.report.warn(
                    draft.line,
                    format!("cocktail '{}' has no ingredients", draft.cocktail.name),
                );
            }
            cocktails.push(draft.finish());
        }
        Conversion {
            cocktails,
            report: self.report,
        }
    }
}

fn push_tag(tags: &mut Vec<String>, raw: &str) {
    let tag = collapse_whitespace(raw).to_lowercase();
    if !tag.is_empty() && !tags.contains(&tag) {
        tags.push(tag);
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
