//! Balanced delimiter scanning.
//!
//! These helpers never parse: they count nesting depth of a single delimiter
//! pair over raw source text. Delimiters inside string literals are counted
//! too, which matches how the registry sources are written in practice.

/// Returns the closing delimiter for an opening one.
fn closing_for(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        _ => None,
    }
}

/// Finds the index of the delimiter matching the one at `open_idx`.
///
/// # Examples
///
/// ```
/// use elements_core::scan::matching_delimiter;
///
/// let text = "f(a, (b), c) + 1";
/// assert_eq!(matching_delimiter(text, 1), Some(11));
/// assert_eq!(matching_delimiter("f(a", 1), None);
/// ```
pub fn matching_delimiter(text: &str, open_idx: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let open = *bytes.get(open_idx)?;
    let close = closing_for(open)?;
    let mut depth = 0usize;

    for (offset, &b) in bytes[open_idx..].iter().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(open_idx + offset);
            }
        }
    }
    None
}

/// Content strictly between the delimiter at `open_idx` and its match.
pub fn balanced_interior(text: &str, open_idx: usize) -> Option<&str> {
    let close = matching_delimiter(text, open_idx)?;
    Some(&text[open_idx + 1..close])
}

/// Content from the delimiter at `open_idx` through its match, inclusive.
pub fn balanced_span(text: &str, open_idx: usize) -> Option<&str> {
    let close = matching_delimiter(text, open_idx)?;
    Some(&text[open_idx..=close])
}

/// Index of the first non-whitespace byte at or after `idx`.
pub fn skip_whitespace(text: &str, idx: usize) -> usize {
    text[idx..]
        .find(|c: char| !c.is_whitespace())
        .map_or(text.len(), |offset| idx + offset)
}

/// Text between the start of the line containing `idx` and `idx`.
pub fn line_prefix(text: &str, idx: usize) -> &str {
    let start = text[..idx].rfind('\n').map_or(0, |nl| nl + 1);
    &text[start..idx]
}

/// Index just past the `//` or `/* */` comment starting at `idx`.
///
/// Line comments end before their newline; an unterminated block comment
/// runs to the end of `text`.
pub fn comment_end(text: &str, idx: usize) -> Option<usize> {
    let rest = text.get(idx..)?;
    if rest.starts_with("//") {
        Some(rest.find('\n').map_or(text.len(), |nl| idx + nl))
    } else if rest.starts_with("/*") {
        Some(rest[2..].find("*/").map_or(text.len(), |close| idx + close + 4))
    } else {
        None
    }
}

/// Index of the first byte at or after `idx` that is neither whitespace
/// nor part of a comment.
pub fn skip_trivia(text: &str, idx: usize) -> usize {
    let mut idx = skip_whitespace(text, idx);
    while let Some(end) = comment_end(text, idx) {
        idx = skip_whitespace(text, end);
    }
    idx
}

/// `text` without surrounding whitespace and comments.
///
/// Comments between tokens are kept; quoted text is never treated as a
/// comment.
///
/// # Examples
///
/// ```
/// use elements_core::scan::trim_comments;
///
/// assert_eq!(trim_comments("// Primary\n  brand: \"#fff\" // Acme's"), "brand: \"#fff\"");
/// assert_eq!(trim_comments(r#"url: "https://x" /* a */"#), r#"url: "https://x""#);
/// ```
pub fn trim_comments(text: &str) -> &str {
    let bytes = text.as_bytes();
    let start = skip_trivia(text, 0);
    let mut end = start;
    let mut quote: Option<u8> = None;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
                end = i + 1;
            }
            i += 1;
            continue;
        }
        if b == b'/' {
            if let Some(after) = comment_end(text, i) {
                i = after;
                continue;
            }
        }
        if matches!(b, b'"' | b'\'' | b'`') {
            quote = Some(b);
        }
        if !b.is_ascii_whitespace() {
            end = i + 1;
        }
        i += 1;
    }
    &text[start..end]
}

/// Splits on `separator` bytes that sit outside brackets, quotes and
/// comments.
///
/// Segments are trimmed of whitespace and surrounding comments; empty
/// segments are dropped, so trailing separators are harmless.
///
/// # Examples
///
/// ```
/// use elements_core::scan::split_top_level;
///
/// let parts = split_top_level(r#"a: 1, b: f(x, y), c: "p, q","#, b',');
/// assert_eq!(parts, vec!["a: 1", "b: f(x, y)", r#"c: "p, q""#]);
///
/// let parts = split_top_level("a: 1, // it's, here\n b: 2 /* , */", b',');
/// assert_eq!(parts, vec!["a: 1", "b: 2"]);
/// ```
pub fn split_top_level(text: &str, separator: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut start = 0;
    let mut i = 0;

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
            if let Some(after) = comment_end(text, i) {
                i = after;
                continue;
            }
        }
        match b {
            b'"' | b'\'' | b'`' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            _ if b == separator && depth == 0 => {
                parts.push(trim_comments(&text[start..i]));
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(trim_comments(&text[start..]));
    parts.retain(|p| !p.is_empty());
    parts
}

/// Strips one level of matching single, double or backtick quotes.
pub fn unquote(text: &str) -> Option<&str> {
    let text = text.trim();
    let bytes = text.as_bytes();
    if bytes.len() >= 2
        && matches!(bytes[0], b'"' | b'\'' | b'`')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        let inner = &text[1..text.len() - 1];
        if !inner.contains(bytes[0] as char) {
            return Some(inner);
        }
    }
    None
}
