//! Slug and cocktail id generation.

/// Convert a display name to a URL-safe slug.
///
/// ```
/// use barback_catalog::slug::slugify;
///
/// assert_eq!(slugify("Oaxaca Old Fashioned"), "oaxaca-old-fashioned");
/// assert_eq!(slugify("Death & Co. Daiquiri"), "death-and-co-daiquiri");
/// assert_eq!(slugify("Piña Colada"), "pina-colada");
/// ```
pub fn slugify(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut last_was_separator = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if c == '&' {
            if !last_was_separator && !result.is_empty() {
                result.push('-');
            }
            result.push_str("and-");
            last_was_separator = true;
        } else if let Some(folded) = fold_char(c) {
            result.push_str(folded);
            last_was_separator = false;
        } else if !last_was_separator && !result.is_empty() {
            result.push('-');
            last_was_separator = true;
        }
    }

    // Trim trailing separator
    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Map accented Latin letters to their ASCII spelling.
fn fold_char(c: char) -> Option<&'static str> {
    let folded = match c.to_lowercase().next().unwrap_or(c) {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => "e",
        'ì' | 'í' | 'î' | 'ï' | 'ī' => "i",
        'ñ' | 'ń' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => "o",
        'œ' => "oe",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' => "u",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        'š' | 'ś' => "s",
        'ž' | 'ź' | 'ż' => "z",
        'ł' => "l",
        _ => return None,
    };
    Some(folded)
}

/// Build the catalog id for a cocktail name: `<prefix>:<slug>`.
///
/// `ordinal` is the 1-based position of the cocktail in the scan and is
/// only used when the name produces an empty slug.
pub fn cocktail_id(prefix: &str, name: &str, ordinal: usize) -> String {
    let mut slug = slugify(name);
    if slug.is_empty() {
        slug = format!("cocktail-{ordinal}");
    }
    let prefix = slugify(prefix);
    if prefix.is_empty() {
        slug
    } else {
        format!("{prefix}:{slug}")
    }
}

/// Whether `id` is non-empty and made only of slug segments joined by `:`.
pub fn is_slug_safe(id: &str) -> bool {
    !id.is_empty() && id.split(':').all(is_slug_segment)
}

fn is_slug_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.starts_with('-')
        && !segment.ends_with('-')
        && !segment.contains("--")
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
