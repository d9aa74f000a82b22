//! Structural checks for a finished catalog.
//!
//! These are the properties every emitted catalog must satisfy. The
//! converter upholds them by construction; `validate_catalog` exists to
//! check catalogs on disk, which may have been edited by hand.

use std::collections::HashSet;

use crate::slug::is_slug_safe;
use crate::types::{CATALOG_VERSION, Catalog};

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    UnsupportedVersion(u32),
    UnsafeId { index: usize, id: String },
    DuplicateId(String),
    EmptyName { id: String },
    EmptyIngredientName { id: String, position: usize },
    UnpairedQuantity { id: String, ingredient: String },
    InvalidQuantity { id: String, ingredient: String },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedVersion(v) => {
                write!(f, "unsupported catalog version {v} (expected {CATALOG_VERSION})")
            }
            Self::UnsafeId { index, id } => {
                write!(f, "cocktail #{index} has an empty or unsafe id {id:?}")
            }
            Self::DuplicateId(id) => write!(f, "duplicate id {id}"),
            Self::EmptyName { id } => write!(f, "{id}: empty name"),
            Self::EmptyIngredientName { id, position } => {
                write!(f, "{id}: ingredient #{position} has no name")
            }
            Self::UnpairedQuantity { id, ingredient } => {
                write!(f, "{id}: '{ingredient}' has qty without unit or unit without qty")
            }
            Self::InvalidQuantity { id, ingredient } => {
                write!(f, "{id}: '{ingredient}' has a negative or non-finite qty")
            }
        }
    }
}

/// Check every catalog invariant, returning all violations found.
pub fn validate_catalog(catalog: &Catalog) -> Vec<Violation> {
    let mut violations = Vec::new();

    if catalog.version != CATALOG_VERSION {
        violations.push(Violation::UnsupportedVersion(catalog.version));
    }

    let mut seen = HashSet::new();
    for (index, cocktail) in catalog.cocktails.iter().enumerate() {
        let id = &cocktail.id;
        if !is_slug_safe(id) {
            violations.push(Violation::UnsafeId {
                index: index + 1,
                id: id.clone(),
            });
        }
        if !seen.insert(id.as_str()) {
            violations.push(Violation::DuplicateId(id.clone()));
        }
        if cocktail.name.trim().is_empty() {
            violations.push(Violation::EmptyName { id: id.clone() });
        }

        for (position, ingredient) in cocktail.ingredients.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                violations.push(Violation::EmptyIngredientName {
                    id: id.clone(),
                    position: position + 1,
                });
            }
            if !ingredient.is_paired() {
                violations.push(Violation::UnpairedQuantity {
                    id: id.clone(),
                    ingredient: ingredient.name.clone(),
                });
            }
            if let Some(qty) = ingredient.qty
                && (!qty.is_finite() || qty < 0.0)
            {
                violations.push(Violation::InvalidQuantity {
                    id: id.clone(),
                    ingredient: ingredient.name.clone(),
                });
            }
        }
    }

    violations
}
