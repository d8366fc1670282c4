//! Application data embedded from TOML at compile time.
//!
//! This module provides access to constants that are:
//! - Embedded at compile time via `include_str!`
//! - Parsed lazily on first access via `OnceLock`
//! - Immutable at runtime (not user-configurable)
//!
//! This is distinct from `config.rs` which handles user preferences.
//!
//! Data files are located in `embedded/`:
//! - `states.toml` - State selector entries and known article categories

use serde::Deserialize;
use std::sync::OnceLock;

const STATES_TOML: &str = include_str!("../embedded/states.toml");

/// Selector and category reference data
#[derive(Debug, Deserialize)]
pub struct RegionData {
    pub states: Vec<String>,
    pub categories: CategoryList,
}

#[derive(Debug, Deserialize)]
pub struct CategoryList {
    pub names: Vec<String>,
}

/// Get region data (lazy-loaded)
pub fn region_data() -> &'static RegionData {
    static DATA: OnceLock<RegionData> = OnceLock::new();
    DATA.get_or_init(|| {
        toml::from_str(STATES_TOML).unwrap_or_else(|e| {
            panic!("Failed to parse states.toml: {}", e);
        })
    })
}

/// States offered by the selector, in display order
pub fn selectable_states() -> &'static [String] {
    &region_data().states
}

/// Case-insensitive lookup of a selector entry
pub fn find_state(name: &str) -> Option<&'static str> {
    let name = name.trim();
    selectable_states()
        .iter()
        .find(|state| state.eq_ignore_ascii_case(name))
        .map(String::as_str)
}

/// Whether `category` is one the backend assigns
pub fn is_known_category(category: &str) -> bool {
    region_data()
        .categories
        .names
        .iter()
        .any(|name| name.eq_ignore_ascii_case(category.trim()))
}
