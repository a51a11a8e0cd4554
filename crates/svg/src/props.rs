//! Destructured prop defaults of a component's function signature.

use elements_core::scan::balanced_interior;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Prop name to literal default value.
pub type PropDefaults = BTreeMap<String, String>;

/// Mode used when the component declares no `mode` default.
pub const DEFAULT_MODE: &str = "light";
/// Color scheme used when the component declares no `colorScheme` default.
pub const DEFAULT_COLOR_SCHEME: &str = "brand";

static SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bfunction\s+[A-Za-z_$][\w$]*\s*(?:<[^>(]*>)?\s*\(\s*\{").expect("valid regex")
});

static STRING_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_$][\w$]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
});

/// Captures `name = "literal"` defaults from the first destructured-parameter
/// function signature (`function Name({ ... })`).
///
/// Non-string defaults are not captured. Returns an empty table when no such
/// signature exists.
///
/// # Examples
///
/// ```
/// use elements_svg::props::extract_prop_defaults;
///
/// let defaults = extract_prop_defaults(
///     r#"export function Logo({ mode = "dark", size = 24, colorScheme = "brand" }) {}"#,
/// );
/// assert_eq!(defaults.get("mode").map(String::as_str), Some("dark"));
/// assert_eq!(defaults.get("colorScheme").map(String::as_str), Some("brand"));
/// assert!(!defaults.contains_key("size"));
/// ```
pub fn extract_prop_defaults(source: &str) -> PropDefaults {
    let mut defaults = PropDefaults::new();
    let Some(signature) = SIGNATURE.find(source) else {
        return defaults;
    };
    let Some(block) = balanced_interior(source, signature.end() - 1) else {
        return defaults;
    };

    for caps in STRING_DEFAULT.captures_iter(block) {
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        defaults
            .entry(caps[1].to_string())
            .or_insert_with(|| value.to_string());
    }
    defaults
}

/// The `(mode, colorScheme)` pair a component renders with at build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Resolved `mode` (e.g., "light").
    pub mode: String,
    /// Resolved `colorScheme` (e.g., "brand").
    pub color_scheme: String,
}

impl Selection {
    /// Resolve from prop defaults, falling back to `light` / `brand`.
    pub fn from_defaults(defaults: &PropDefaults) -> Self {
        Self {
            mode: defaults
                .get("mode")
                .cloned()
                .unwrap_or_else(|| DEFAULT_MODE.to_string()),
            color_scheme: defaults
                .get("colorScheme")
                .cloned()
                .unwrap_or_else(|| DEFAULT_COLOR_SCHEME.to_string()),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::from_defaults(&PropDefaults::new())
    }
}
