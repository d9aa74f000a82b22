//! Header-label resolution for spreadsheet exports.
//!
//! Exports from different sheets label the same data differently
//! ("drink" vs. "Cocktail Name", "preparation" vs. "Method"). Labels are
//! compared after lowercasing and dropping everything but letters and
//! digits, so "Created By", "created_by" and "CREATED-BY" all match.

use crate::error::CatalogError;

const FIELD_COUNT: usize = 10;

/// A logical column the converter understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Ingredient,
    Amount,
    Unit,
    Glass,
    Garnish,
    Instructions,
    Creator,
    Story,
    Tags,
}

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Name,
        Field::Ingredient,
        Field::Amount,
        Field::Unit,
        Field::Glass,
        Field::Garnish,
        Field::Instructions,
        Field::Creator,
        Field::Story,
        Field::Tags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Ingredient => "ingredient",
            Self::Amount => "amount",
            Self::Unit => "unit",
            Self::Glass => "glass",
            Self::Garnish => "garnish",
            Self::Instructions => "instructions",
            Self::Creator => "creator",
            Self::Story => "story",
            Self::Tags => "tags",
        }
    }

    /// Normalized header labels that map to this field.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Name => &["drink", "name", "cocktail", "cocktailname", "drinkname", "recipe"],
            Self::Ingredient => &["ingredient", "ingredients", "item"],
            Self::Amount => &["amount", "qty", "quantity", "measure"],
            Self::Unit => &["unit", "units", "uom"],
            Self::Glass => &["glass", "glassware"],
            Self::Garnish => &["garnish", "garnishes"],
            Self::Instructions => &["preparation", "instructions", "method", "directions"],
            Self::Creator => &["creator", "author", "bartender", "createdby"],
            Self::Story => &["story", "notes", "history", "description"],
            Self::Tags => &["tags", "tag", "category", "style"],
        }
    }

    /// Resolve a raw header label to a field.
    pub fn from_label(label: &str) -> Option<Self> {
        let key = normalize_label(label);
        if key.is_empty() {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&key.as_str()))
    }
}

fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Column indexes for each field present in the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    indexes: [Option<usize>; FIELD_COUNT],
}

impl ColumnMap {
    /// Resolve a header row. The first column matching a field wins.
    ///
    /// Fails with [`CatalogError::MissingColumn`] when the name or
    /// ingredient column is absent.
    pub fn from_header(cells: &[String]) -> Result<Self, CatalogError> {
        let mut map = Self::default();
        for (i, cell) in cells.iter().enumerate() {
            if let Some(field) = Field::from_label(cell) {
                let slot = &mut map.indexes[field as usize];
                if slot.is_none() {
                    *slot = Some(i);
                }
            }
        }

        for required in [Field::Name, Field::Ingredient] {
            if map.index(required).is_none() {
                return Err(CatalogError::missing_column(required.as_str()));
            }
        }
        Ok(map)
    }

    /// Whether a row looks like a column header (two or more known labels).
    pub fn looks_like_header(cells: &[String]) -> bool {
        cells
            .iter()
            .filter(|c| Field::from_label(c).is_some())
            .count()
            >= 2
    }

    /// Whether every field in `self` sits at the same column in `other`.
    pub fn agrees_with(&self, other: &ColumnMap) -> bool {
        self.fields()
            .into_iter()
            .all(|f| self.index(f) == other.index(f))
    }

    pub fn index(&self, field: Field) -> Option<usize> {
        self.indexes[field as usize]
    }

    /// The trimmed cell for `field`, or `""` when the column is absent or
    /// the row is short.
    pub fn get<'a>(&self, cells: &'a [String], field: Field) -> &'a str {
        self.index(field)
            .and_then(|i| cells.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// Fields present in this map, in declaration order.
    pub fn fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.index(*f).is_some())
            .collect()
    }
}
