//! Row classification.
//!
//! Each data row is sorted into one [`RowKind`] by looking at which cells
//! are filled. The decision is per-row; what a kind *means* for the
//! cocktail being accumulated is up to the scan in [`crate::convert`].

use crate::columns::{ColumnMap, Field};

/// What a spreadsheet row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Every cell is empty.
    Blank,
    /// A copy of the column header (sheets pasted together).
    RepeatedHeader,
    /// First non-empty cell starts with `#` or `//`.
    Comment,
    /// Names a cocktail. May also carry an ingredient on the same row.
    Header,
    /// A garnish line under the current cocktail.
    Garnish,
    /// An ingredient line under the current cocktail.
    Ingredient,
    /// Instructions or story text under the current cocktail.
    Note,
    /// Anything else (stray values in unrelated columns).
    Noise,
}

impl RowKind {
    pub const ALL: [RowKind; 8] = [
        Self::Header,
        Self::Ingredient,
        Self::Garnish,
        Self::Note,
        Self::Blank,
        Self::Comment,
        Self::RepeatedHeader,
        Self::Noise,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::RepeatedHeader => "repeated-header",
            Self::Comment => "comment",
            Self::Header => "header",
            Self::Garnish => "garnish",
            Self::Ingredient => "ingredient",
            Self::Note => "note",
            Self::Noise => "noise",
        }
    }

    /// Parse a kind name, accepting `_` or spaces for `-`.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL.into_iter().find(|kind| kind.as_str() == key)
    }
}

impl std::fmt::Display for RowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one data row against the resolved header.
pub fn classify_row(columns: &ColumnMap, cells: &[String]) -> RowKind {
    let Some(first) = cells.iter().map(|c| c.trim()).find(|c| !c.is_empty()) else {
        return RowKind::Blank;
    };

    if first.starts_with('#') || first.starts_with("//") {
        return RowKind::Comment;
    }
    if ColumnMap::looks_like_header(cells)
        && ColumnMap::from_header(cells).is_ok_and(|repeat| repeat.agrees_with(columns))
    {
        return RowKind::RepeatedHeader;
    }

    let name = columns.get(cells, Field::Name);
    let ingredient = columns.get(cells, Field::Ingredient);

    if !name.is_empty() {
        return RowKind::Header;
    }
    if !ingredient.is_empty() {
        return if garnish_text(ingredient).is_some() {
            RowKind::Garnish
        } else {
            RowKind::Ingredient
        };
    }
    if !columns.get(cells, Field::Garnish).is_empty() {
        return RowKind::Garnish;
    }
    if !columns.get(cells, Field::Instructions).is_empty()
        || !columns.get(cells, Field::Story).is_empty()
    {
        return RowKind::Note;
    }
    RowKind::Noise
}

/// If an ingredient cell is really a garnish line (`"Garnish: lime wheel"`,
/// `"garnish - orange twist"`), return the garnish text.
pub fn garnish_text(cell: &str) -> Option<&str> {
    let cell = cell.trim();
    let head = cell.get(..7)?;
    if !head.eq_ignore_ascii_case("garnish") {
        return None;
    }
    let rest = &cell[7..];
    let rest = rest
        .strip_prefix("es")
        .or_else(|| rest.strip_prefix("ES"))
        .unwrap_or(rest);
    let mut chars = rest.chars();
    match chars.next() {
        Some(':' | '-' | '–') => {}
        Some(c) if c.is_whitespace() => {}
        _ => return None,
    }
    let text = chars.as_str().trim_start_matches([':', '-', '–', ' ']).trim();
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn columns() -> ColumnMap {
        ColumnMap::from_header(&row(&[
            "drink",
            "ingredient",
            "amount",
            "glass",
            "garnish",
            "preparation",
        ]))
        .unwrap()
    }

    #[test]
    fn test_blank_and_comment() {
        let cols = columns();
        assert_eq!(classify_row(&cols, &row(&["", " ", ""])), RowKind::Blank);
        assert_eq!(classify_row(&cols, &[]), RowKind::Blank);
        assert_eq!(
            classify_row(&cols, &row(&["", "# check with Alex", ""])),
            RowKind::Comment
        );
        assert_eq!(classify_row(&cols, &row(&["// TBD"])), RowKind::Comment);
    }

    #[test]
    fn test_repeated_header() {
        let cols = columns();
        assert_eq!(
            classify_row(&cols, &row(&["Drink", "Ingredient", "Amount"])),
            RowKind::RepeatedHeader
        );
        // Label words in the wrong columns are data, not a header.
        assert_eq!(
            classify_row(&cols, &row(&["Item", "Recipe", "2"])),
            RowKind::Header
        );
        assert_eq!(
            classify_row(&cols, &row(&["", "", "", "", "Style", "Notes"])),
            RowKind::Garnish
        );
    }

    #[test]
    fn test_header_with_and_without_ingredient() {
        let cols = columns();
        assert_eq!(
            classify_row(&cols, &row(&["Daiquiri", "Rum", "2"])),
            RowKind::Header
        );
        assert_eq!(classify_row(&cols, &row(&["Daiquiri"])), RowKind::Header);
    }

    #[test]
    fn test_ingredient_and_garnish_rows() {
        let cols = columns();
        assert_eq!(
            classify_row(&cols, &row(&["", "Lime juice", "0.75"])),
            RowKind::Ingredient
        );
        assert_eq!(
            classify_row(&cols, &row(&["", "Garnish: lime wheel", ""])),
            RowKind::Garnish
        );
        assert_eq!(
            classify_row(&cols, &row(&["", "", "", "", "Orange twist"])),
            RowKind::Garnish
        );
    }

    #[test]
    fn test_note_and_noise() {
        let cols = columns();
        assert_eq!(
            classify_row(&cols, &row(&["", "", "", "", "", "Dry shake first."])),
            RowKind::Note
        );
        assert_eq!(classify_row(&cols, &row(&["", "", "", "coupe"])), RowKind::Noise);
    }

    #[test]
    fn test_garnish_text() {
        assert_eq!(garnish_text("Garnish: lime wheel"), Some("lime wheel"));
        assert_eq!(garnish_text("GARNISH - orange twist"), Some("orange twist"));
        assert_eq!(garnish_text("garnishes: 3 cherries"), Some("3 cherries"));
        assert_eq!(garnish_text("Garnish"), None);
        assert_eq!(garnish_text("Garnished rim salt"), None);
        assert_eq!(garnish_text("Lime"), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(RowKind::from_str_loose("Noise"), Some(RowKind::Noise));
        assert_eq!(
            RowKind::from_str_loose("repeated_header"),
            Some(RowKind::RepeatedHeader)
        );
        assert_eq!(RowKind::from_str_loose("garbage"), None);
        for kind in RowKind::ALL {
            assert_eq!(RowKind::from_str_loose(kind.as_str()), Some(kind));
        }
    }
}
