//! Cocktail catalog data model, spreadsheet conversion, and JSON I/O.
//!
//! This crate turns a cocktail-recipe spreadsheet export (CSV) into a
//! normalized catalog: rows are classified, grouped by cocktail, and their
//! ingredient amounts are parsed into quantities with canonical units.
//! It has no terminal or logging setup of its own; the `barback` binary
//! drives it and reports the results.

pub mod classify;
pub mod columns;
pub mod convert;
pub mod error;
pub mod json;
pub mod settings;
pub mod slug;
pub mod source;
pub mod types;
pub mod units;
pub mod validate;

pub use classify::{RowKind, classify_row};
pub use columns::{ColumnMap, Field};
pub use convert::{
    Conversion, ConvertOptions, ConvertReport, RowWarning, convert_rows, locate_header,
};
pub use error::CatalogError;
pub use json::{load_catalog, to_json_string, write_catalog};
pub use settings::{ConvertSettings, Settings, load_settings, save_settings, settings_path};
pub use slug::{cocktail_id, is_slug_safe, slugify};
pub use source::{SourceRow, read_rows, read_rows_from_path, read_rows_from_str};
pub use types::*;
pub use units::{CL_TO_ML, OZ_TO_ML, Quantity, Unit};
pub use validate::{Violation, validate_catalog};
