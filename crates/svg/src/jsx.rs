//! Lexical extraction of JSX fragments from component source.
//!
//! Fragments are located with a regex and bounded by depth counting; the
//! JSX itself is never parsed.

use elements_core::scan::{
    balanced_interior, comment_end, line_prefix, matching_delimiter, skip_trivia,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static RETURN_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breturn\s*\(").expect("valid regex"));

static ENTRY_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:"([^"]+)"|'([^']+)'|([A-Za-z_$][\w$-]*))\s*:\s*"#).expect("valid regex")
});

static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([A-Za-z][\w.:-]*)").expect("valid regex"));

/// Offset of the first byte after `const NAME =` that is followed by `open`.
fn declaration_body(source: &str, name: &str, open: u8) -> Option<usize> {
    let pattern = format!(r"\bconst\s+{}\s*(?::[^=]+)?=\s*", regex::escape(name));
    let declaration = Regex::new(&pattern).ok()?;
    declaration
        .find_iter(source)
        .map(|m| m.end())
        .find(|&end| source.as_bytes().get(end) == Some(&open))
}

/// Interior of `const NAME = ( ... )`, trimmed.
///
/// # Examples
///
/// ```
/// use elements_svg::jsx::extract_jsx_variable;
///
/// let source = "const Mark = (\n  <g><path d=\"M0 0\" /></g>\n);";
/// assert_eq!(extract_jsx_variable(source, "Mark"), Some("<g><path d=\"M0 0\" /></g>"));
/// assert_eq!(extract_jsx_variable(source, "Other"), None);
/// ```
pub fn extract_jsx_variable<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let open = declaration_body(source, name, b'(')?;
    balanced_interior(source, open).map(str::trim)
}

/// JSX-valued entries of `const NAME = { key: (<jsx/>), other: <jsx/> }`.
///
/// Values wrapped in parentheses are unwrapped; values that do not start
/// with `<` are skipped.
pub fn extract_jsx_object_entries<'a>(source: &'a str, name: &str) -> BTreeMap<String, &'a str> {
    let mut entries = BTreeMap::new();
    let Some(open) = declaration_body(source, name, b'{') else {
        return entries;
    };
    let Some(body) = balanced_interior(source, open) else {
        return entries;
    };

    let mut cursor = 0;
    while cursor < body.len() {
        cursor = skip_separators(body, cursor);
        let Some(caps) = ENTRY_KEY.captures(&body[cursor..]) else {
            cursor = next_top_level_comma(body, cursor) + 1;
            continue;
        };
        let key = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        let value_start = cursor + caps.get(0).map_or(0, |m| m.end());

        let value_end = match body.as_bytes().get(value_start) {
            Some(b'(') => matching_delimiter(body, value_start).map(|close| {
                let inner = body[value_start + 1..close].trim();
                if inner.starts_with('<') {
                    entries.insert(key.to_string(), inner);
                }
                close + 1
            }),
            Some(b'<') => element_end(body, value_start).map(|end| {
                entries.insert(key.to_string(), &body[value_start..end]);
                end
            }),
            _ => None,
        };
        let next = value_end.unwrap_or_else(|| next_top_level_comma(body, value_start) + 1);
        cursor = next.max(cursor + 1);
    }
    entries
}

fn skip_separators(text: &str, idx: usize) -> usize {
    let mut idx = skip_trivia(text, idx);
    while text.as_bytes().get(idx) == Some(&b',') {
        idx = skip_trivia(text, idx + 1);
    }
    idx
}

/// Index of the next `,` outside brackets, quotes and comments, or
/// `text.len()`.
fn next_top_level_comma(text: &str, from: usize) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut i = from;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        if b == b'/' {
            if let Some(end) = comment_end(text, i) {
                i = end;
                continue;
            }
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b',' if depth <= 0 => return i,
            _ => {}
        }
        i += 1;
    }
    text.len()
}

/// End of the opening tag starting at `start` and whether it self-closes.
///
/// `>` inside `{ ... }` attribute expressions is ignored.
fn opening_tag_end(text: &str, start: usize) -> Option<(usize, bool)> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    for (offset, &b) in bytes[start..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            b'>' if depth == 0 => {
                let idx = start + offset;
                return Some((idx + 1, idx > 0 && bytes[idx - 1] == b'/'));
            }
            _ => {}
        }
    }
    None
}

/// Finds `needle` where it is followed by a tag-name boundary.
fn find_tag(text: &str, needle: &str) -> Option<usize> {
    text.match_indices(needle).map(|(idx, _)| idx).find(|&idx| {
        text[idx + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '/' || c == '>')
    })
}

/// Index just past the element that starts at `start` (`<name ...`).
fn element_end(text: &str, start: usize) -> Option<usize> {
    let name = TAG_NAME.captures(&text[start..])?.get(1)?.as_str();
    let (mut cursor, self_closing) = opening_tag_end(text, start)?;
    if self_closing {
        return Some(cursor);
    }

    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 1usize;
    while depth > 0 {
        let rest = &text[cursor..];
        let next_close = find_tag(rest, &close)?;
        match find_tag(rest, &open) {
            Some(next_open) if next_open < next_close => {
                let (end, self_closing) = opening_tag_end(text, cursor + next_open)?;
                if !self_closing {
                    depth += 1;
                }
                cursor = end;
            }
            _ => {
                let close_start = cursor + next_close;
                cursor = close_start + text[close_start..].find('>')? + 1;
                depth -= 1;
            }
        }
    }
    Some(cursor)
}

/// Bodies of every `return ( ... )` that contains an `<svg` element.
///
/// Returns on a line that already holds `//` before the keyword are
/// treated as commented out.
pub fn find_svg_returns(source: &str) -> Vec<&str> {
    RETURN_OPEN
        .find_iter(source)
        .filter(|m| !line_prefix(source, m.start()).contains("//"))
        .filter_map(|m| balanced_interior(source, m.end() - 1))
        .map(str::trim)
        .filter(|body| body.contains("<svg"))
        .collect()
}

/// The last `<svg`-bearing return body.
///
/// Components with light/dark branches place their complete render last,
/// so the last match is taken as the canonical one.
pub fn find_last_svg_return(source: &str) -> Option<&str> {
    find_svg_returns(source).pop()
}
