//! Data model types for the cocktail catalog.
//!
//! These types mirror the emitted JSON exactly: field names are camelCase
//! and optional fields serialize as `null` rather than being omitted.

use serde::{Deserialize, Serialize};

use crate::units::Quantity;

/// Schema version written into every catalog.
pub const CATALOG_VERSION: u32 = 1;

// ── Catalog ─────────────────────────────────────────────────────────────────

/// The top-level document: every cocktail converted from one spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub version: u32,
    /// ISO date (`YYYY-MM-DD`) the catalog was generated.
    pub generated_at: String,
    pub cocktails: Vec<Cocktail>,
}

impl Catalog {
    pub fn new(cocktails: Vec<Cocktail>, generated_at: impl Into<String>) -> Self {
        Self {
            version: CATALOG_VERSION,
            generated_at: generated_at.into(),
            cocktails,
        }
    }

    /// Total number of ingredient lines across all cocktails.
    pub fn ingredient_count(&self) -> usize {
        self.cocktails.iter().map(|c| c.ingredients.len()).sum()
    }
}

// ── Cocktail ────────────────────────────────────────────────────────────────

/// A single cocktail record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cocktail {
    /// `<prefix>:<slug>`, derived from `name`.
    pub id: String,
    pub name: String,
    pub creator_name: Option<String>,
    pub glass: Option<String>,
    pub garnish: Option<String>,
    pub instructions: Option<String>,
    pub story: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Cocktail {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            creator_name: None,
            glass: None,
            garnish: None,
            instructions: None,
            story: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
        }
    }
}

// ── Ingredient ──────────────────────────────────────────────────────────────

/// One ingredient line. `qty` and `unit` are either both set or both `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub qty: Option<f64>,
    pub unit: Option<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: Option<Quantity>) -> Self {
        let (qty, unit) = match quantity {
            Some(q) => (Some(q.value), Some(q.unit.as_str().to_string())),
            None => (None, None),
        };
        Self {
            name: name.into(),
            qty,
            unit,
        }
    }

    /// Whether the pairing invariant holds for this line.
    pub fn is_paired(&self) -> bool {
        self.qty.is_some() == self.unit.is_some()
    }
}
