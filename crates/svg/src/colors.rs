//! `COLORS` table resolution.
//!
//! Logo components keep their palette in a `const COLORS = { ... } as const;`
//! literal. Three shapes are recognised, tried in a fixed order:
//!
//! 1. `{ scheme: { mode: { role: "value", ... } } }`
//! 2. `{ scheme: { mode: "value" } }`
//! 3. `{ mode: "value" }`
//!
//! The first shape that matches the selected `(mode, colorScheme)` wins.

use crate::literal::{LiteralValue, ObjectLiteral};
use crate::props::Selection;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Color role (e.g., "color", "primary") to CSS color.
pub type ColorTable = BTreeMap<String, String>;

/// Role name used for single-value shapes.
pub const COLOR_ROLE: &str = "color";

static COLORS_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\bconst\s+COLORS\s*(?::[^=]*)?=\s*(\{.*?\})\s*(?:as\s+const\s*)?;")
        .expect("valid regex")
});

/// Outcome of a single shape matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorLookup {
    /// The shape is not present for this selection.
    NotFound,
    /// `scheme -> mode -> { role: value }`.
    Nested(ColorTable),
    /// A single color for the selection.
    Scalar(String),
}

impl ColorLookup {
    /// Flatten into a table; scalars are stored under [`COLOR_ROLE`].
    pub fn into_table(self) -> ColorTable {
        match self {
            ColorLookup::NotFound => ColorTable::new(),
            ColorLookup::Nested(table) => table,
            ColorLookup::Scalar(value) => ColorTable::from([(COLOR_ROLE.to_string(), value)]),
        }
    }

    fn is_found(&self) -> bool {
        !matches!(self, ColorLookup::NotFound)
    }
}

/// Locates the `COLORS` object literal in component source.
pub fn find_colors_literal(source: &str) -> Option<ObjectLiteral<'_>> {
    let caps = COLORS_STATEMENT.captures(source)?;
    ObjectLiteral::parse(caps.get(1)?.as_str())
}

/// Shape 1: `scheme: { mode: { role: "value" } }`.
pub fn match_nested(colors: &ObjectLiteral<'_>, selection: &Selection) -> ColorLookup {
    match colors.lookup(&[selection.color_scheme.as_str(), selection.mode.as_str()]) {
        Some(LiteralValue::Object(roles)) => {
            let table = roles.string_entries();
            if table.is_empty() {
                ColorLookup::NotFound
            } else {
                ColorLookup::Nested(table)
            }
        }
        _ => ColorLookup::NotFound,
    }
}

/// Shape 2: `scheme: { mode: "value" }`.
pub fn match_scheme_scalar(colors: &ObjectLiteral<'_>, selection: &Selection) -> ColorLookup {
    match colors.lookup(&[selection.color_scheme.as_str(), selection.mode.as_str()]) {
        Some(LiteralValue::Str(value)) => ColorLookup::Scalar(value.to_string()),
        _ => ColorLookup::NotFound,
    }
}

/// Shape 3: `mode: "value"` at the top level.
pub fn match_mode_scalar(colors: &ObjectLiteral<'_>, selection: &Selection) -> ColorLookup {
    match colors.get(&selection.mode) {
        Some(LiteralValue::Str(value)) => ColorLookup::Scalar(value.to_string()),
        _ => ColorLookup::NotFound,
    }
}

/// Runs the shape matchers in priority order against a located literal.
pub fn lookup_colors(colors: &ObjectLiteral<'_>, selection: &Selection) -> ColorLookup {
    let matchers: [fn(&ObjectLiteral<'_>, &Selection) -> ColorLookup; 3] =
        [match_nested, match_scheme_scalar, match_mode_scalar];
    matchers
        .iter()
        .map(|matcher| matcher(colors, selection))
        .find(ColorLookup::is_found)
        .unwrap_or(ColorLookup::NotFound)
}

/// Resolves the color table for a component's selected `(mode, colorScheme)`.
///
/// Empty when there is no `COLORS` literal or nothing matches.
///
/// # Examples
///
/// ```
/// use elements_svg::colors::resolve_colors;
/// use elements_svg::props::Selection;
///
/// let source = r##"const COLORS = { brand: { light: "#635BFF", dark: "#fff" } } as const;"##;
/// let table = resolve_colors(source, &Selection::default());
/// assert_eq!(table.get("color").map(String::as_str), Some("#635BFF"));
/// ```
pub fn resolve_colors(source: &str, selection: &Selection) -> ColorTable {
    let Some(colors) = find_colors_literal(source) else {
        log::debug!("no COLORS literal found");
        return ColorTable::new();
    };
    let lookup = lookup_colors(&colors, selection);
    log::debug!(
        "COLORS lookup for {}/{}: {:?}",
        selection.color_scheme,
        selection.mode,
        lookup
    );
    lookup.into_table()
}
