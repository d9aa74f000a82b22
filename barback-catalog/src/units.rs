//! Ingredient amount parsing and unit normalization.
//!
//! Spreadsheet amounts arrive in every shape a bartender might type:
//! ```text
//! 1.5   ¾   1 1/2 oz   1-1/2   2 dashes   30ml   top   2-3 drops
//! ```
//! [`parse_amount`] turns these into a [`Quantity`] (a number plus a
//! canonical [`Unit`]); [`Quantity::normalize`] converts bar measures to
//! milliliters.

use thiserror::Error;

/// Milliliters per US fluid ounce.
pub const OZ_TO_ML: f64 = 29.5735;

/// Milliliters per centiliter.
pub const CL_TO_ML: f64 = 10.0;

/// Canonical measurement units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Oz,
    Ml,
    Cl,
    Dash,
    Drop,
    Barspoon,
    Tsp,
    Tbsp,
    Cup,
    Pinch,
    Piece,
    Slice,
    Leaf,
    Sprig,
    Wedge,
    Top,
    Rinse,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oz => "oz",
            Self::Ml => "ml",
            Self::Cl => "cl",
            Self::Dash => "dash",
            Self::Drop => "drop",
            Self::Barspoon => "barspoon",
            Self::Tsp => "tsp",
            Self::Tbsp => "tbsp",
            Self::Cup => "cup",
            Self::Pinch => "pinch",
            Self::Piece => "piece",
            Self::Slice => "slice",
            Self::Leaf => "leaf",
            Self::Sprig => "sprig",
            Self::Wedge => "wedge",
            Self::Top => "top",
            Self::Rinse => "rinse",
        }
    }

    /// Parse a unit spelling, accepting plurals, abbreviations, and a
    /// trailing period. Case-insensitive.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let lower = s.trim().trim_end_matches('.').to_lowercase();
        let key = lower.split_whitespace().collect::<Vec<_>>().join(" ");
        let unit = match key.as_str() {
            "oz" | "ozs" | "ounce" | "ounces" | "fl oz" | "fl. oz" | "fl.oz" | "floz"
            | "fluid ounce" | "fluid ounces" => Self::Oz,
            "ml" | "mls" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Self::Ml
            }
            "cl" | "cls" | "centiliter" | "centiliters" | "centilitre" | "centilitres" => {
                Self::Cl
            }
            "dash" | "dashes" => Self::Dash,
            "drop" | "drops" => Self::Drop,
            "barspoon" | "barspoons" | "bar spoon" | "bar spoons" | "bsp" | "bspn" => {
                Self::Barspoon
            }
            "tsp" | "tsps" | "teaspoon" | "teaspoons" => Self::Tsp,
            "tbsp" | "tbsps" | "tbs" | "tablespoon" | "tablespoons" => Self::Tbsp,
            "cup" | "cups" => Self::Cup,
            "pinch" | "pinches" => Self::Pinch,
            "piece" | "pieces" | "pc" | "pcs" | "whole" => Self::Piece,
            "slice" | "slices" => Self::Slice,
            "leaf" | "leaves" => Self::Leaf,
            "sprig" | "sprigs" => Self::Sprig,
            "wedge" | "wedges" => Self::Wedge,
            "top" | "top with" | "to top" => Self::Top,
            "rinse" | "rinses" => Self::Rinse,
            _ => return None,
        };
        Some(unit)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric amount with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Convert ounces and centiliters to milliliters when `to_ml` is set,
    /// and round to the precision the catalog stores.
    ///
    /// Milliliter amounts keep one decimal place; everything else keeps two.
    pub fn normalize(self, to_ml: bool) -> Self {
        match (to_ml, self.unit) {
            (true, Unit::Oz) => Self::new(round_to(self.value * OZ_TO_ML, 1), Unit::Ml),
            (true, Unit::Cl) => Self::new(round_to(self.value * CL_TO_ML, 1), Unit::Ml),
            (_, Unit::Ml) => Self::new(round_to(self.value, 1), Unit::Ml),
            (_, unit) => Self::new(round_to(self.value, 2), unit),
        }
    }
}

/// Why an amount cell could not be turned into a [`Quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("unparseable amount {0:?}")]
    Malformed(String),

    #[error("unknown unit {0:?}")]
    UnknownUnit(String),

    #[error("amount {0:?} has no unit and no default unit is configured")]
    MissingUnit(String),
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ── Numbers ─────────────────────────────────────────────────────────────────

fn vulgar_fraction(c: char) -> Option<f64> {
    let value = match c {
        '½' => 1.0 / 2.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 1.0 / 4.0,
        '¾' => 3.0 / 4.0,
        '⅕' => 1.0 / 5.0,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        _ => return None,
    };
    Some(value)
}

/// Parse a bar-style number: `1.5`, `.75`, `1,5`, `3/4`, `1 1/2`,
/// `1-1/2`, `½`, `1½`. A range such as `2-3` yields its lower bound.
///
/// Returns `None` for anything negative, non-finite, or not a number.
///
/// ```
/// use barback_catalog::units::parse_number;
///
/// assert_eq!(parse_number("1 1/2"), Some(1.5));
/// assert_eq!(parse_number("¾"), Some(0.75));
/// assert_eq!(parse_number("2-3"), Some(2.0));
/// assert_eq!(parse_number("splash"), None);
/// ```
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let value = if let Some((low, _)) = s.split_once('–') {
        parse_mixed(low)?
    } else if let Some((whole, rest)) = s.split_once('-') {
        let whole = whole.trim();
        if whole.is_empty() {
            return None;
        }
        // "1-1/2" is a mixed number; anything else around a dash is a range.
        if rest.contains('/') && whole.chars().all(|c| c.is_ascii_digit()) {
            parse_simple(whole)? + parse_simple(rest)?
        } else {
            parse_mixed(whole)?
        }
    } else {
        parse_mixed(s)?
    };

    (value.is_finite() && value >= 0.0).then_some(value)
}

/// A whole number, a fraction, or both separated by whitespace.
fn parse_mixed(s: &str) -> Option<f64> {
    let s = s.trim();

    if let Some(last) = s.chars().last()
        && let Some(frac) = vulgar_fraction(last)
    {
        let whole = s[..s.len() - last.len_utf8()].trim();
        return if whole.is_empty() {
            Some(frac)
        } else {
            Some(parse_simple(whole)? + frac)
        };
    }

    let mut parts = s.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), None, None) => parse_simple(a),
        (Some(a), Some(b), None) if b.contains('/') && !a.contains('/') => {
            Some(parse_simple(a)? + parse_simple(b)?)
        }
        _ => None,
    }
}

fn parse_simple(s: &str) -> Option<f64> {
    match s.split_once('/') {
        Some((num, den)) => {
            let num = parse_decimal(num)?;
            let den = parse_decimal(den)?;
            if den == 0.0 { None } else { Some(num / den) }
        }
        None => parse_decimal(s),
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }
    // A lone comma is a decimal comma ("1,5"); alongside a period it is a
    // thousands separator.
    let normalized = if s.contains('.') {
        s.replace(',', "")
    } else {
        s.replace(',', ".")
    };
    normalized.parse::<f64>().ok()
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ',' | '/' | ' ' | '-' | '–') || vulgar_fraction(c).is_some()
}

/// Split `text` into its leading numeric run and the remainder.
fn split_number_prefix(text: &str) -> (&str, &str) {
    let starts_numeric = text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.' || vulgar_fraction(c).is_some());
    if !starts_numeric {
        return ("", text);
    }

    let end = text
        .char_indices()
        .find(|&(_, c)| !is_number_char(c))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let number = text[..end].trim_end_matches([' ', '-', ',']);
    (number, &text[number.len()..])
}

/// Match a one- or two-word unit at the start of `rest`, returning the
/// unit and whatever follows it (with a leading "of" dropped).
fn match_unit_prefix(rest: &str) -> Option<(Unit, &str)> {
    let rest = rest.trim_start();
    let first_end = rest.find(char::is_whitespace).unwrap_or(rest.len());

    let mut candidates = Vec::with_capacity(2);
    if first_end < rest.len() {
        let after = rest[first_end..].trim_start();
        let second_len = after.find(char::is_whitespace).unwrap_or(after.len());
        candidates.push(rest.len() - after.len() + second_len);
    }
    candidates.push(first_end);

    candidates.into_iter().find_map(|end| {
        let unit = Unit::from_str_loose(&rest[..end])?;
        let remaining = rest[end..].trim_start();
        let remaining = remaining
            .strip_prefix("of ")
            .or_else(|| remaining.strip_prefix("Of "))
            .unwrap_or(remaining);
        Some((unit, remaining.trim()))
    })
}

// ── Amounts ─────────────────────────────────────────────────────────────────

/// Parse an amount cell into a quantity.
///
/// * `unit_hint` is the contents of a separate unit column (may be empty).
/// * `default_unit` applies when neither the cell nor the hint names a unit.
///
/// An empty cell is `Ok(None)`. A bare unit word (`"dash"`, `"a dash"`,
/// `"top"`) counts as one of that unit.
pub fn parse_amount(
    text: &str,
    unit_hint: &str,
    default_unit: Option<Unit>,
) -> Result<Option<Quantity>, AmountError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let spaced = text.replace(" to ", "-");
    let (number, rest) = split_number_prefix(&spaced);

    if number.is_empty() {
        let lower = text.to_lowercase();
        let bare = ["a ", "an ", "one "]
            .iter()
            .find_map(|article| lower.strip_prefix(article))
            .unwrap_or(&lower);
        return match Unit::from_str_loose(bare) {
            Some(unit) => Ok(Some(Quantity::new(1.0, unit))),
            None => Err(AmountError::Malformed(text.to_string())),
        };
    }

    let value = parse_number(number).ok_or_else(|| AmountError::Malformed(text.to_string()))?;

    let rest = rest.trim();
    let unit_hint = unit_hint.trim();
    let unit = if !rest.is_empty() {
        Unit::from_str_loose(rest).ok_or_else(|| AmountError::UnknownUnit(rest.to_string()))?
    } else if !unit_hint.is_empty() {
        Unit::from_str_loose(unit_hint)
            .ok_or_else(|| AmountError::UnknownUnit(unit_hint.to_string()))?
    } else {
        default_unit.ok_or_else(|| AmountError::MissingUnit(text.to_string()))?
    };

    Ok(Some(Quantity::new(value, unit)))
}

/// Split an amount embedded at the start of an ingredient cell.
///
/// Only splits when the number is followed by a recognized unit and some
/// ingredient text remains, so names like "7UP" or "151 Rum" are left alone.
///
/// ```
/// use barback_catalog::units::{Unit, split_leading_amount};
///
/// let (qty, rest) = split_leading_amount("2 dashes Angostura bitters").unwrap();
/// assert_eq!(qty.value, 2.0);
/// assert_eq!(qty.unit, Unit::Dash);
/// assert_eq!(rest, "Angostura bitters");
/// ```
pub fn split_leading_amount(text: &str) -> Option<(Quantity, &str)> {
    let text = text.trim();
    let (number, rest) = split_number_prefix(text);
    if number.is_empty() {
        return None;
    }
    let value = parse_number(number)?;
    let (unit, remaining) = match_unit_prefix(rest)?;
    if remaining.is_empty() {
        return None;
    }
    Some((Quantity::new(value, unit), remaining))
}
