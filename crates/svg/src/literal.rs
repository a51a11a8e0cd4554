//! Read-only views over JavaScript object literals in source text.
//!
//! Only direct children are visible through [`ObjectLiteral::get`]; nested
//! objects are reached by chaining lookups.

use elements_core::scan::{balanced_span, split_top_level, trim_comments, unquote};
use std::collections::BTreeMap;

/// A value found on the right-hand side of an object entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralValue<'a> {
    /// A nested `{ ... }` object.
    Object(ObjectLiteral<'a>),
    /// A quoted string, without its quotes.
    Str(&'a str),
    /// Anything else (numbers, identifiers, calls), trimmed.
    Expr(&'a str),
}

impl<'a> LiteralValue<'a> {
    /// Classify raw value text.
    pub fn classify(raw: &'a str) -> Self {
        let raw = strip_as_const(raw.trim());
        if raw.starts_with('{') && balanced_span(raw, 0).is_some_and(|s| s.len() == raw.len()) {
            return LiteralValue::Object(ObjectLiteral { text: raw });
        }
        match unquote(raw) {
            Some(inner) => LiteralValue::Str(inner),
            None => LiteralValue::Expr(raw),
        }
    }

    /// The string payload, if this is a string literal.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            LiteralValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The nested object, if this is one.
    pub fn as_object(&self) -> Option<ObjectLiteral<'a>> {
        match *self {
            LiteralValue::Object(o) => Some(o),
            _ => None,
        }
    }
}

fn strip_as_const(raw: &str) -> &str {
    raw.strip_suffix("as const").map_or(raw, str::trim_end)
}

/// An object literal, including its outer braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectLiteral<'a> {
    text: &'a str,
}

impl<'a> ObjectLiteral<'a> {
    /// Wrap text that starts with `{`; the object ends at the matching `}`.
    pub fn parse(text: &'a str) -> Option<Self> {
        let text = text.trim_start();
        if !text.starts_with('{') {
            return None;
        }
        balanced_span(text, 0).map(|text| Self { text })
    }

    /// Source text of the literal, braces included.
    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Direct `key: value` entries in source order.
    ///
    /// Shorthand properties and spreads have no value and are skipped;
    /// comments around keys and values are ignored.
    pub fn entries(&self) -> Vec<(&'a str, LiteralValue<'a>)> {
        let text: &'a str = self.text;
        let interior = &text[1..text.len() - 1];
        split_top_level(interior, b',')
            .into_iter()
            .filter_map(|entry| {
                let colon = entry.find(':')?;
                let key = trim_comments(&entry[..colon]);
                let key = unquote(key).unwrap_or(key);
                if key.is_empty() || key.starts_with("...") {
                    return None;
                }
                Some((key, LiteralValue::classify(&entry[colon + 1..])))
            })
            .collect()
    }

    /// Value of a direct child.
    pub fn get(&self, key: &str) -> Option<LiteralValue<'a>> {
        self.entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Follow a path of keys through nested objects.
    pub fn lookup(&self, path: &[&str]) -> Option<LiteralValue<'a>> {
        let (first, rest) = path.split_first()?;
        let value = self.get(first)?;
        if rest.is_empty() {
            return Some(value);
        }
        value.as_object()?.lookup(rest)
    }

    /// All direct children whose value is a string literal.
    pub fn string_entries(&self) -> BTreeMap<String, String> {
        self.entries()
            .into_iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.as_str()?.to_string())))
            .collect()
    }
}
