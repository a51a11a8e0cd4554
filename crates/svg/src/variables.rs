//! Static resolution of local color variables.
//!
//! Components derive their fill colors from props through a handful of
//! conventional statements (`const color = COLORS[colorScheme][mode];`,
//! `const textColor = mode === "dark" ? ... : ...;`). Each convention is a
//! scan; scans run in a fixed order and an earlier scan's result is never
//! overwritten by a later one. Statements no scan can resolve are left out.

use crate::colors::{COLOR_ROLE, ColorTable, find_colors_literal};
use crate::expr::Scope;
use crate::literal::ObjectLiteral;
use crate::props::{PropDefaults, Selection};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Local variable name to resolved literal.
pub type LocalVariables = BTreeMap<String, String>;

/// Literal used when a color cannot be determined.
pub const CURRENT_COLOR: &str = "currentColor";

static CONST_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bconst\s+([A-Za-z_$][\w$]*)\s*(?::[^=;]+)?=[^=>]").expect("valid regex")
});

static STATEMENT_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r";|\b(?:const|let|var|return|function|export)\b").expect("valid regex")
});

static MODE_TERNARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\(?\s*mode\s*[!=]==?\s*["'][\w-]+["']\s*\)?\s*\?"#).expect("valid regex")
});

static SCHEME_TERNARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\(?\s*colorScheme\s*[!=]==?\s*["'][\w-]+["']\s*\)?\s*\?\s*(?:"[^"]*"|'[^']*')\s*:\s*(?:"[^"]*"|'[^']*')$"#,
    )
    .expect("valid regex")
});

static SCHEME_GRAYSCALE_TERNARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)^\(?\s*colorScheme\s*[!=]==?\s*["'][\w-]+["']\s*\)?\s*\?.*\bmode\s*[!=]==?.*:\s*COLORS\s*\.\s*grayscale\s*\[\s*mode\s*\]$"#,
    )
    .expect("valid regex")
});

static SCHEME_CONDITIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\(?\s*(?:colorScheme|mode)\s*[!=]==?"#).expect("valid regex")
});

static COLORS_BY_SCHEME_AND_MODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^COLORS\s*\[\s*colorScheme\s*\]\s*(?:\?\.)?\s*\[\s*mode\s*\]$").expect("valid regex")
});

static COLORS_BY_MODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^COLORS\s*\[\s*mode\s*\]$").expect("valid regex"));

/// A `const NAME = EXPR` statement found in component source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstStatement<'a> {
    /// Declared name.
    pub name: &'a str,
    /// Right-hand side, trimmed, without the terminating `;`.
    pub expr: &'a str,
}

/// Collects `const NAME = EXPR` statements with identifier bindings.
///
/// The right-hand side ends at `;` or at the next statement keyword, so
/// semicolon-free sources are handled line by line.
pub fn const_statements(source: &str) -> Vec<ConstStatement<'_>> {
    CONST_DECLARATION
        .captures_iter(source)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let start = caps.get(0)?.end() - 1;
            let rest = &source[start..];
            let end = STATEMENT_END.find(rest).map_or(rest.len(), |m| m.start());
            let expr = rest[..end].trim();
            (!expr.is_empty()).then_some(ConstStatement { name, expr })
        })
        .collect()
}

struct Resolver<'a> {
    selection: &'a Selection,
    defaults: &'a PropDefaults,
    colors: &'a ColorTable,
    literal: Option<ObjectLiteral<'a>>,
    statements: Vec<ConstStatement<'a>>,
    resolved: LocalVariables,
}

impl<'a> Resolver<'a> {
    fn scope_bindings(&self) -> BTreeMap<String, String> {
        let mut bindings = self.defaults.clone();
        bindings.extend(self.resolved.iter().map(|(k, v)| (k.clone(), v.clone())));
        bindings
    }

    fn evaluate(&self, expr: &str) -> Option<String> {
        let bindings = self.scope_bindings();
        Scope::new(self.selection, &bindings)
            .with_colors(self.literal)
            .evaluate_str(expr)
    }

    fn scan(
        &mut self,
        label: &str,
        matches: impl Fn(&ConstStatement<'a>) -> bool,
        resolve: impl Fn(&Self, &ConstStatement<'a>) -> Option<String>,
    ) {
        let statements = self.statements.clone();
        for statement in statements.iter().filter(|s| matches(s)) {
            if self.resolved.contains_key(statement.name) {
                continue;
            }
            match resolve(self, statement) {
                Some(value) => {
                    log::debug!("{}: {} = {}", label, statement.name, value);
                    self.resolved.insert(statement.name.to_string(), value);
                }
                None => log::debug!("{}: could not resolve {}", label, statement.name),
            }
        }
    }

    /// `COLORS[colorScheme][mode]`: the resolved table's color, else the
    /// `scheme: { mode: "value" }` entry of the literal.
    fn scheme_mode_color(&self) -> Option<String> {
        if let Some(color) = self.colors.get(COLOR_ROLE) {
            return Some(color.clone());
        }
        self.literal?
            .lookup(&[
                self.selection.color_scheme.as_str(),
                self.selection.mode.as_str(),
            ])?
            .as_str()
            .map(str::to_string)
    }
}

/// Resolves local color variables against the selected defaults.
///
/// # Examples
///
/// ```
/// use elements_svg::props::{extract_prop_defaults, Selection};
/// use elements_svg::colors::resolve_colors;
/// use elements_svg::variables::resolve_local_variables;
///
/// let source = r##"
/// function Logo({ mode = "dark" }) {
///   const textColor = mode === "dark" ? "#fff" : "#000";
///   return (<svg><path fill={textColor} /></svg>);
/// }"##;
/// let defaults = extract_prop_defaults(source);
/// let selection = Selection::from_defaults(&defaults);
/// let colors = resolve_colors(source, &selection);
/// let locals = resolve_local_variables(source, &defaults, &colors);
/// assert_eq!(locals.get("textColor").map(String::as_str), Some("#fff"));
/// ```
pub fn resolve_local_variables(
    source: &str,
    defaults: &PropDefaults,
    colors: &ColorTable,
) -> LocalVariables {
    let selection = Selection::from_defaults(defaults);
    let mut resolver = Resolver {
        selection: &selection,
        defaults,
        colors,
        literal: find_colors_literal(source),
        statements: const_statements(source),
        resolved: LocalVariables::new(),
    };

    resolver.scan(
        "textColor ternary",
        |s| s.name == "textColor" && MODE_TERNARY.is_match(s.expr),
        |r, s| r.evaluate(s.expr),
    );
    resolver.scan(
        "colorScheme ternary",
        |s| SCHEME_TERNARY.is_match(s.expr),
        |r, s| r.evaluate(s.expr),
    );
    resolver.scan(
        "brand/grayscale ternary",
        |s| SCHEME_GRAYSCALE_TERNARY.is_match(s.expr),
        |r, s| r.evaluate(s.expr),
    );
    resolver.scan(
        "COLORS[colorScheme][mode]",
        |s| s.name == COLOR_ROLE && COLORS_BY_SCHEME_AND_MODE.is_match(s.expr),
        |r, _| r.scheme_mode_color(),
    );
    resolver.scan(
        "COLORS[mode]",
        |s| s.name == COLOR_ROLE && COLORS_BY_MODE.is_match(s.expr),
        |r, _| {
            Some(
                r.colors
                    .get(COLOR_ROLE)
                    .cloned()
                    .unwrap_or_else(|| CURRENT_COLOR.to_string()),
            )
        },
    );
    resolver.scan(
        "generic COLORS[colorScheme][mode]",
        |s| COLORS_BY_SCHEME_AND_MODE.is_match(s.expr),
        |r, _| r.scheme_mode_color(),
    );
    resolver.scan(
        "generic ternary",
        |s| SCHEME_CONDITIONAL.is_match(s.expr),
        |r, s| r.evaluate(s.expr),
    );

    resolver.resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::resolve_colors;
    use crate::props::extract_prop_defaults;

    fn resolve(source: &str) -> LocalVariables {
        let defaults = extract_prop_defaults(source);
        let colors = resolve_colors(source, &Selection::from_defaults(&defaults));
        resolve_local_variables(source, &defaults, &colors)
    }

    #[test]
    fn test_const_statements_split_on_keywords() {
        let source = "const a = \"x\"\nconst b = mode === \"dark\"\n  ? \"1\"\n  : \"2\"\nreturn (<svg />)";
        let statements = const_statements(source);
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].name, "a");
        assert_eq!(statements[0].expr, "\"x\"");
        assert_eq!(statements[1].expr, "mode === \"dark\"\n  ? \"1\"\n  : \"2\"");
    }

    #[test]
    fn test_const_statements_keep_raw_rhs() {
        let statements = const_statements("const f = () => 1;\nconst g = x;");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].expr, "() => 1");
        assert_eq!(statements[1].expr, "x");
    }

    #[test]
    fn test_scheme_ternary() {
        let locals = resolve(
            r##"function L({ colorScheme = "grayscale" }) {
  const fill = colorScheme === "brand" ? "#FF5A1F" : "#000";
}"##,
        );
        assert_eq!(locals["fill"], "#000");
    }

    #[test]
    fn test_brand_grayscale_double_ternary() {
        let source = r##"
function L({ mode = "dark", colorScheme = "grayscale" }) {
  const COLORS = { grayscale: { light: "#111111", dark: "#EEEEEE" } } as const;
  const accent =
    colorScheme === "brand"
      ? (mode === "light" ? "#0070F3" : "#3291FF")
      : COLORS.grayscale[mode];
}"##;
        assert_eq!(resolve(source)["accent"], "#EEEEEE");

        let brand = source.replace("colorScheme = \"grayscale\"", "colorScheme = \"brand\"");
        assert_eq!(resolve(&brand)["accent"], "#3291FF");
    }

    #[test]
    fn test_color_from_table_or_literal() {
        let source = r##"
function L({ mode = "dark" }) {
  const COLORS = { brand: { dark: "#111", light: "#eee" } } as const;
  const color = COLORS[colorScheme][mode];
  const tint = COLORS[colorScheme][mode];
}"##;
        let locals = resolve(source);
        assert_eq!(locals["color"], "#111");
        assert_eq!(locals["tint"], "#111");
    }

    #[test]
    fn test_color_by_mode_falls_back_to_current_color() {
        let source = r##"
function L({ mode = "dark" }) {
  const COLORS = { light: { a: "#1", b: "#2" } };
  const color = COLORS[mode];
}"##;
        assert_eq!(resolve(source)["color"], CURRENT_COLOR);
    }

    #[test]
    fn test_unresolvable_is_omitted() {
        let source = r##"
function L({ mode = "dark" }) {
  const color = useBrandColor(mode);
  const other = colorScheme === "brand" ? palette.primary : "#000";
}"##;
        let locals = resolve(source);
        assert!(!locals.contains_key("color"));
        assert!(!locals.contains_key("other"));
    }

    #[test]
    fn test_earlier_scan_wins() {
        let source = r##"
function L({ mode = "light" }) {
  const textColor = mode === "dark" ? "#fff" : "#000";
  const textColor = colorScheme === "brand" ? "#f00" : "#0f0";
}"##;
        assert_eq!(resolve(source)["textColor"], "#000");
    }

    #[test]
    fn test_generic_mode_ternary_any_name() {
        let source = r##"
function L({ mode = "dark" }) {
  const COLORS = { brand: { light: "#0A0A0A", dark: "#FAFAFA" } } as const;
  const stroke = mode === "dark" ? COLORS.brand.dark : COLORS.brand.light;
}"##;
        assert_eq!(resolve(source)["stroke"], "#FAFAFA");
    }
}
