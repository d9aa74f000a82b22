//! Catalog JSON reading and writing.

use std::path::Path;

use crate::error::CatalogError;
use crate::types::Catalog;

/// Encode a catalog as pretty-printed JSON (two-space indent, non-ASCII
/// text kept verbatim) with a trailing newline.
pub fn to_json_string(catalog: &Catalog) -> Result<String, CatalogError> {
    let mut json = serde_json::to_string_pretty(catalog)?;
    json.push('\n');
    Ok(json)
}

/// Write a catalog to `path`, creating parent directories as needed.
///
/// The file is written to a temporary sibling and renamed into place so a
/// failed run never leaves a truncated catalog behind.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let json = to_json_string(catalog)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;

    log::debug!(
        "Wrote {} cocktails to {}",
        catalog.cocktails.len(),
        path.display()
    );
    Ok(())
}

/// Load a previously written catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    let catalog = serde_json::from_str(&contents)?;
    Ok(catalog)
}
