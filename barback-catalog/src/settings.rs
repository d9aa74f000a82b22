//! Persistent converter settings.
//!
//! Settings live in `~/.config/barback/settings.toml`. Every key is
//! optional; anything missing falls back to the built-in default, and
//! command-line flags override both.
//!
//! ```toml
//! [convert]
//! id_prefix = "deathandco"
//! creator_name = "Death & Co"
//! default_unit = "oz"
//! convert_to_ml = true
//! blank_row_ends_cocktail = true
//! header_scan_rows = 10
//! default_tags = []
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::convert::ConvertOptions;
use crate::error::CatalogError;
use crate::units::Unit;

/// Canonical path to the settings file: `~/.config/barback/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("barback").join("settings.toml")
}

/// The whole settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub convert: ConvertSettings,
}

/// The `[convert]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertSettings {
    pub id_prefix: String,
    /// Empty means cocktails without a creator column get `null`.
    pub creator_name: String,
    /// Empty means bare numbers without a unit are left without a quantity.
    pub default_unit: String,
    pub convert_to_ml: bool,
    pub blank_row_ends_cocktail: bool,
    pub header_scan_rows: usize,
    pub default_tags: Vec<String>,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        let defaults = ConvertOptions::default();
        Self {
            id_prefix: defaults.id_prefix,
            creator_name: defaults.creator_name.unwrap_or_default(),
            default_unit: defaults
                .default_unit
                .map(|u| u.as_str().to_string())
                .unwrap_or_default(),
            convert_to_ml: defaults.convert_to_ml,
            blank_row_ends_cocktail: defaults.blank_row_ends_cocktail,
            header_scan_rows: defaults.header_scan_rows,
            default_tags: defaults.default_tags,
        }
    }
}

impl Settings {
    /// Build conversion options from these settings.
    ///
    /// Fails when `default_unit` names a unit the parser does not know.
    pub fn convert_options(&self) -> Result<ConvertOptions, CatalogError> {
        let c = &self.convert;
        let default_unit = parse_unit_setting(&c.default_unit)?;
        let creator = c.creator_name.trim();

        Ok(ConvertOptions::new()
            .id_prefix(c.id_prefix.trim())
            .creator_name((!creator.is_empty()).then(|| creator.to_string()))
            .default_unit(default_unit)
            .convert_to_ml(c.convert_to_ml)
            .blank_row_ends_cocktail(c.blank_row_ends_cocktail)
            .header_scan_rows(c.header_scan_rows)
            .default_tags(c.default_tags.clone()))
    }
}

/// Parse a unit name from settings or the command line. Empty or `"none"`
/// means no default unit.
pub fn parse_unit_setting(value: &str) -> Result<Option<Unit>, CatalogError> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    Unit::from_str_loose(value)
        .map(Some)
        .ok_or_else(|| CatalogError::settings(format!("unknown unit '{value}'")))
}

/// Load settings from `path`. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, CatalogError> {
    if !path.exists() {
        log::debug!("No settings file at {}; using defaults", path.display());
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents)
        .map_err(|e| CatalogError::settings(format!("{}: {}", path.display(), e)))
}

/// Save settings to `path`, creating the parent directory.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(settings)
        .map_err(|e| CatalogError::settings(e.to_string()))?;

    // Write atomically
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;

    Ok(())
}
