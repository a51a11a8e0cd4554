//! JSX to SVG markup rewriting.
//!
//! [`render_svg`] applies a fixed sequence of global text rewrites to the
//! chosen JSX body:
//!
//! 1. strip React-only attributes (`className`, spreads, `role="img"`)
//! 2. convert `style={{ ... }}` objects to CSS text
//! 3. substitute `fill` / `stroke` color references
//! 4. substitute `stopColor` references
//! 5. inline referenced JSX sub-expressions, then force any remaining
//!    `fill={...}` / `stroke={...}` to `currentColor`
//! 6. unwrap literal attribute values, strip JSX comments and template
//!    literals
//! 7. rename camelCase presentation attributes
//! 8. add the SVG namespace to the root element
//! 9. normalize whitespace

use crate::colors::{COLOR_ROLE, ColorTable};
use crate::jsx::{extract_jsx_object_entries, extract_jsx_variable};
use crate::literal::{LiteralValue, ObjectLiteral};
use crate::variables::{CURRENT_COLOR, LocalVariables};
use elements_core::case::camel_to_kebab;
use elements_core::scan::{matching_delimiter, unquote};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Namespace added to the root `<svg>` element.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// camelCase presentation attributes renamed to their SVG spelling.
pub const ATTRIBUTE_RENAMES: &[&str] = &[
    "stopColor",
    "stopOpacity",
    "fillRule",
    "clipRule",
    "clipPath",
    "strokeWidth",
    "strokeLinecap",
    "strokeLinejoin",
    "strokeMiterlimit",
    "strokeDasharray",
    "strokeDashoffset",
    "strokeOpacity",
    "fillOpacity",
    "floodColor",
    "floodOpacity",
];

const MAX_INLINE_DEPTH: usize = 8;

static CLASS_NAME_EXPR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+(className)=\{").expect("valid regex"));

static REACT_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\s+className=(?:"[^"]*"|'[^']*')|\s+role=["']img["']|\s*\{\s*\.\.\.[A-Za-z_$][\w$.]*\s*\}"#,
    )
    .expect("valid regex")
});

static STYLE_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+(style)=\{").expect("valid regex"));

static FILL_STROKE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(fill|stroke)=\{").expect("valid regex"));

static STOP_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(stopColor)=\{").expect("valid regex"));

static COLORS_MEMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^colors\s*(?:\?\.|\.)\s*([A-Za-z_$][\w$]*)$").expect("valid regex")
});

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\s*([A-Za-z_$][\w$]*)(?:\s*\.\s*([A-Za-z_$][\w$-]*))?\s*\}")
        .expect("valid regex")
});

static LITERAL_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"=\{\s*(?:"([^"]*)"|'([^']*)'|`([^`$]*)`|(-?\d+(?:\.\d+)?))\s*\}"#)
        .expect("valid regex")
});

static JSX_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\s*/\*.*?\*/\s*\}").expect("valid regex"));

static TEMPLATE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\s*`[^`]*`\s*\}").expect("valid regex"));

static RENAMED_ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b({})=", ATTRIBUTE_RENAMES.join("|"))).expect("valid regex")
});

static LEADING_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]+").expect("valid regex"));

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

static UNRESOLVED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[a-zA-Z][^{}]*\}?").expect("valid regex"));

/// Resolution tables and source a JSX body is rendered against.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Full component source, for sub-expression lookups.
    pub source: &'a str,
    /// Resolved `COLORS` table.
    pub colors: &'a ColorTable,
    /// Resolved local variables.
    pub locals: &'a LocalVariables,
}

/// Serialized SVG markup for one component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgRender {
    /// The SVG document text.
    pub svg: String,
    /// `fill` / `stroke` / `stopColor` expressions replaced by `currentColor`.
    pub fallbacks: Vec<String>,
}

impl SvgRender {
    /// Placeholders such as `{icon}` that survived serialization.
    pub fn unresolved_expressions(&self) -> Vec<String> {
        unresolved_expressions(&self.svg)
    }
}

/// Rewrites every `name={ ... }` matched by `pattern`.
///
/// The pattern must end at the opening brace and capture the attribute
/// name in group 1. `replace` receives the name and the trimmed expression
/// and returns the replacement for the whole match, or `None` to keep it.
fn rewrite_braced(
    text: &str,
    pattern: &Regex,
    mut replace: impl FnMut(&str, &str) -> Option<String>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    while let Some(caps) = pattern.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else { break };
        let open = whole.end() - 1;
        let Some(close) = matching_delimiter(text, open) else {
            break;
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        out.push_str(&text[pos..whole.start()]);
        match replace(name, text[open + 1..close].trim()) {
            Some(replacement) => out.push_str(&replacement),
            None => out.push_str(&text[whole.start()..=close]),
        }
        pos = close + 1;
    }
    out.push_str(&text[pos..]);
    out
}

impl RenderContext<'_> {
    /// Literal for a color expression, if one is known.
    fn resolve_color(&self, expr: &str) -> Option<String> {
        if let Some(literal) = unquote(expr) {
            return Some(literal.to_string());
        }
        if let Some(caps) = COLORS_MEMBER.captures(expr) {
            return self.colors.get(&caps[1]).cloned();
        }
        if expr == COLOR_ROLE {
            return self
                .colors
                .get(COLOR_ROLE)
                .or_else(|| self.locals.get(COLOR_ROLE))
                .cloned();
        }
        self.locals.get(expr).cloned()
    }

    fn style_value(&self, value: LiteralValue<'_>) -> Option<String> {
        match value {
            LiteralValue::Str(s) => Some(s.to_string()),
            LiteralValue::Expr(e) if e.parse::<f64>().is_ok() => Some(e.to_string()),
            LiteralValue::Expr(e) => self.resolve_color(e),
            LiteralValue::Object(_) => None,
        }
    }
}

struct Renderer<'a> {
    ctx: RenderContext<'a>,
    fallbacks: Vec<String>,
}

impl<'a> Renderer<'a> {
    fn strip_react_attributes(&self, text: &str) -> String {
        let text = rewrite_braced(text, &CLASS_NAME_EXPR, |_, _| Some(String::new()));
        REACT_ONLY.replace_all(&text, "").into_owned()
    }

    fn convert_styles(&self, text: &str) -> String {
        let ctx = self.ctx;
        rewrite_braced(text, &STYLE_ATTR, |_, expr| {
            let object = ObjectLiteral::parse(expr).filter(|o| o.as_str().len() == expr.len())?;
            let css = object
                .entries()
                .into_iter()
                .filter_map(|(key, value)| {
                    let value = ctx.style_value(value)?;
                    Some(format!("{}:{}", camel_to_kebab(key), value))
                })
                .collect::<Vec<_>>()
                .join(";");
            if css.is_empty() {
                Some(String::new())
            } else {
                Some(format!(" style=\"{css}\""))
            }
        })
    }

    fn substitute_colors(&self, text: &str) -> String {
        let ctx = self.ctx;
        rewrite_braced(text, &FILL_STROKE, |name, expr| {
            let value = ctx.resolve_color(expr)?;
            log::debug!("{name}={{{expr}}} -> {value}");
            Some(format!("{name}=\"{value}\""))
        })
    }

    fn substitute_stop_colors(&mut self, text: &str) -> String {
        let ctx = self.ctx;
        let fallbacks = &mut self.fallbacks;
        rewrite_braced(text, &STOP_COLOR, |_, expr| {
            let value = ctx.resolve_color(expr).unwrap_or_else(|| {
                fallbacks.push(expr.to_string());
                CURRENT_COLOR.to_string()
            });
            Some(format!("stop-color=\"{value}\""))
        })
    }

    fn force_fallbacks(&mut self, text: &str) -> String {
        let fallbacks = &mut self.fallbacks;
        rewrite_braced(text, &FILL_STROKE, |name, expr| {
            log::debug!("{name}={{{expr}}} unresolved, using {CURRENT_COLOR}");
            fallbacks.push(expr.to_string());
            Some(format!("{name}=\"{CURRENT_COLOR}\""))
        })
    }

    fn lookup_fragment(&self, caps: &Captures<'_>) -> Option<&'a str> {
        let ident = caps.get(1)?.as_str();
        let fragment = match caps.get(2) {
            Some(prop) => extract_jsx_object_entries(self.ctx.source, ident)
                .get(prop.as_str())
                .copied(),
            None => extract_jsx_variable(self.ctx.source, ident),
        }?;
        fragment.starts_with('<').then_some(fragment)
    }

    fn inline_references(&mut self, text: &str, depth: usize) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in REFERENCE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if text[..whole.start()].ends_with('=') {
                continue;
            }
            let Some(fragment) = self.lookup_fragment(&caps) else {
                continue;
            };
            log::debug!("inlining {}", whole.as_str());
            out.push_str(&text[last..whole.start()]);
            out.push_str(&self.render_fragment(fragment, depth + 1));
            last = whole.end();
        }
        out.push_str(&text[last..]);
        out
    }

    fn render_fragment(&mut self, fragment: &str, depth: usize) -> String {
        if depth > MAX_INLINE_DEPTH {
            log::debug!("inline depth exceeded, leaving fragment as is");
            return fragment.to_string();
        }
        let text = self.substitute_colors(fragment);
        let text = self.inline_references(&text, depth);
        self.force_fallbacks(&text)
    }
}

fn unwrap_literal_attributes(text: &str) -> String {
    LITERAL_ATTRIBUTE
        .replace_all(text, |caps: &Captures<'_>| {
            let value = (1..=4)
                .find_map(|i| caps.get(i))
                .map_or("", |m| m.as_str());
            format!("=\"{value}\"")
        })
        .into_owned()
}

fn strip_dead_expressions(text: &str) -> String {
    let text = JSX_COMMENT.replace_all(text, "");
    TEMPLATE_LITERAL.replace_all(&text, "").into_owned()
}

fn rename_attributes(text: &str) -> String {
    RENAMED_ATTRIBUTE
        .replace_all(text, |caps: &Captures<'_>| format!("{}=", camel_to_kebab(&caps[1])))
        .into_owned()
}

fn ensure_namespace(text: &str) -> String {
    let Some(start) = text.find("<svg") else {
        return text.to_string();
    };
    let tag_end = text[start..].find('>').map_or(text.len(), |i| start + i);
    if text[start..tag_end].contains("xmlns=") {
        return text.to_string();
    }
    let after = start + "<svg".len();
    format!("{}<svg xmlns=\"{SVG_NAMESPACE}\"{}", &text[..start], &text[after..])
}

fn normalize_whitespace(text: &str) -> String {
    let text = LEADING_INDENT.replace_all(text, "\n");
    BLANK_LINES.replace_all(&text, "\n\n").trim().to_string()
}

/// Serializes a JSX body to standalone SVG markup.
///
/// Output may still contain `{identifier}` placeholders that no resolver
/// understood; see [`unresolved_expressions`].
///
/// # Examples
///
/// ```
/// use elements_svg::colors::ColorTable;
/// use elements_svg::serialize::{render_svg, RenderContext};
/// use elements_svg::variables::LocalVariables;
///
/// let colors = ColorTable::from([("color".to_string(), "#000".to_string())]);
/// let locals = LocalVariables::new();
/// let ctx = RenderContext { source: "", colors: &colors, locals: &locals };
/// let render = render_svg(r#"<svg className="logo"><path fill={color} /></svg>"#, &ctx);
/// assert_eq!(
///     render.svg,
///     r##"<svg xmlns="http://www.w3.org/2000/svg"><path fill="#000" /></svg>"##
/// );
/// ```
pub fn render_svg(jsx: &str, ctx: &RenderContext<'_>) -> SvgRender {
    let mut renderer = Renderer {
        ctx: *ctx,
        fallbacks: Vec::new(),
    };

    let text = renderer.strip_react_attributes(jsx);
    let text = renderer.convert_styles(&text);
    let text = renderer.substitute_colors(&text);
    let text = renderer.substitute_stop_colors(&text);
    let text = renderer.inline_references(&text, 0);
    let text = renderer.force_fallbacks(&text);
    let text = unwrap_literal_attributes(&text);
    let text = strip_dead_expressions(&text);
    let text = rename_attributes(&text);
    let text = ensure_namespace(&text);

    SvgRender {
        svg: normalize_whitespace(&text),
        fallbacks: renderer.fallbacks,
    }
}

/// Distinct `{identifier...}` placeholders left in serialized markup.
pub fn unresolved_expressions(svg: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for m in UNRESOLVED.find_iter(svg) {
        let expr = m.as_str().to_string();
        if !found.contains(&expr) {
            found.push(expr);
        }
    }
    found
}
