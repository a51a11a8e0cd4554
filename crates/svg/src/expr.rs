//! Evaluator for the color-picking expressions used inside logo components.
//!
//! Supported: string and number literals, identifiers, member access on
//! `COLORS` (`.key`, `[ident]`, `["key"]`, optional chaining), equality
//! (`===`, `!==`, `==`, `!=`), fallbacks (`??`, `||`), ternaries and
//! parentheses. Anything else fails to evaluate.

use crate::literal::{LiteralValue, ObjectLiteral};
use crate::props::Selection;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Str(String),
    Number(String),
    Ident(String),
    Dot,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Question,
    Colon,
    Equals { negated: bool },
    Fallback,
}

fn tokenize(input: &str) -> Option<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match b {
            _ if b.is_ascii_whitespace() => i += 1,
            b'"' | b'\'' => {
                let end = i + 1 + input[i + 1..].find(b as char)?;
                tokens.push(Token::Str(input[i + 1..end].to_string()));
                i = end + 1;
            }
            b'.' => {
                tokens.push(Token::Dot);
                i += 1;
            }
            b'[' => {
                tokens.push(Token::LBracket);
                i += 1;
            }
            b']' => {
                tokens.push(Token::RBracket);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            b':' => {
                tokens.push(Token::Colon);
                i += 1;
            }
            b'?' if next == Some(b'?') => {
                tokens.push(Token::Fallback);
                i += 2;
            }
            b'?' if next == Some(b'.') => {
                tokens.push(Token::Dot);
                i += 2;
            }
            b'?' => {
                tokens.push(Token::Question);
                i += 1;
            }
            b'|' if next == Some(b'|') => {
                tokens.push(Token::Fallback);
                i += 2;
            }
            b'=' | b'!' if next == Some(b'=') => {
                let strict = bytes.get(i + 2) == Some(&b'=');
                tokens.push(Token::Equals {
                    negated: b == b'!',
                });
                i += if strict { 3 } else { 2 };
            }
            _ if b.is_ascii_digit() => {
                let len = input[i..]
                    .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                    .unwrap_or(input.len() - i);
                tokens.push(Token::Number(input[i..i + len].to_string()));
                i += len;
            }
            _ if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {
                let len = input[i..]
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
                    .unwrap_or(input.len() - i);
                tokens.push(Token::Ident(input[i..i + len].to_string()));
                i += len;
            }
            _ => return None,
        }
    }
    Some(tokens)
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Str(String),
    Ident(String),
    Member(Box<Expr>, Box<Expr>),
    Compare(Box<Expr>, Box<Expr>, bool),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
    Fallback(Box<Expr>, Box<Expr>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Option<()> {
        self.eat(token).then_some(())
    }

    fn conditional(&mut self) -> Option<Expr> {
        let test = self.fallback()?;
        if !self.eat(&Token::Question) {
            return Some(test);
        }
        let consequent = self.conditional()?;
        self.expect(&Token::Colon)?;
        let alternate = self.conditional()?;
        Some(Expr::Conditional(
            Box::new(test),
            Box::new(consequent),
            Box::new(alternate),
        ))
    }

    fn fallback(&mut self) -> Option<Expr> {
        let mut left = self.comparison()?;
        while self.eat(&Token::Fallback) {
            let right = self.comparison()?;
            left = Expr::Fallback(Box::new(left), Box::new(right));
        }
        Some(left)
    }

    fn comparison(&mut self) -> Option<Expr> {
        let left = self.member()?;
        if let Some(Token::Equals { negated }) = self.peek().cloned() {
            self.pos += 1;
            let right = self.member()?;
            return Some(Expr::Compare(Box::new(left), Box::new(right), negated));
        }
        Some(left)
    }

    fn member(&mut self) -> Option<Expr> {
        let mut object = self.primary()?;
        loop {
            let key = if self.eat(&Token::Dot) {
                if self.eat(&Token::LBracket) {
                    self.computed_key()?
                } else {
                    match self.advance()? {
                        Token::Ident(name) => Expr::Str(name),
                        _ => return None,
                    }
                }
            } else if self.eat(&Token::LBracket) {
                self.computed_key()?
            } else {
                break;
            };
            object = Expr::Member(Box::new(object), Box::new(key));
        }
        Some(object)
    }

    fn computed_key(&mut self) -> Option<Expr> {
        let key = self.conditional()?;
        self.expect(&Token::RBracket)?;
        Some(key)
    }

    fn primary(&mut self) -> Option<Expr> {
        match self.advance()? {
            Token::Str(s) | Token::Number(s) => Some(Expr::Str(s)),
            Token::Ident(name) => Some(Expr::Ident(name)),
            Token::LParen => {
                let inner = self.conditional()?;
                self.expect(&Token::RParen)?;
                Some(inner)
            }
            _ => None,
        }
    }
}

fn parse(input: &str) -> Option<Expr> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
    };
    let expr = parser.conditional()?;
    (parser.pos == parser.tokens.len()).then_some(expr)
}

/// Result of evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// A string (or number) literal.
    Str(String),
    /// Result of a comparison.
    Bool(bool),
    /// An object inside the `COLORS` literal.
    Object(ObjectLiteral<'a>),
}

impl Value<'_> {
    fn truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Object(_) => true,
        }
    }

    /// The string payload, if any.
    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Name the `COLORS` literal is bound to inside expressions.
pub const COLORS_IDENT: &str = "COLORS";

/// Identifier bindings visible to an expression.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    selection: &'a Selection,
    bindings: &'a BTreeMap<String, String>,
    colors: Option<ObjectLiteral<'a>>,
}

impl<'a> Scope<'a> {
    /// `mode` and `colorScheme` come from `selection`; other identifiers
    /// resolve through `bindings`.
    pub fn new(selection: &'a Selection, bindings: &'a BTreeMap<String, String>) -> Self {
        Self {
            selection,
            bindings,
            colors: None,
        }
    }

    /// Bind `COLORS` to a located object literal.
    pub fn with_colors(mut self, colors: Option<ObjectLiteral<'a>>) -> Self {
        self.colors = colors;
        self
    }

    fn lookup(&self, name: &str) -> Option<Value<'a>> {
        match name {
            "mode" => Some(Value::Str(self.selection.mode.clone())),
            "colorScheme" => Some(Value::Str(self.selection.color_scheme.clone())),
            COLORS_IDENT => self.colors.map(Value::Object),
            _ => self.bindings.get(name).cloned().map(Value::Str),
        }
    }

    fn eval(&self, expr: &Expr) -> Option<Value<'a>> {
        match expr {
            Expr::Str(s) => Some(Value::Str(s.clone())),
            Expr::Ident(name) => self.lookup(name),
            Expr::Member(object, key) => {
                let Value::Object(object) = self.eval(object)? else {
                    return None;
                };
                let key = self.eval(key)?.into_string()?;
                match object.get(&key)? {
                    LiteralValue::Object(inner) => Some(Value::Object(inner)),
                    LiteralValue::Str(s) => Some(Value::Str(s.to_string())),
                    LiteralValue::Expr(e) if e.parse::<f64>().is_ok() => {
                        Some(Value::Str(e.to_string()))
                    }
                    LiteralValue::Expr(_) => None,
                }
            }
            Expr::Compare(left, right, negated) => {
                let left = self.eval(left)?.into_string()?;
                let right = self.eval(right)?.into_string()?;
                Some(Value::Bool((left == right) != *negated))
            }
            Expr::Conditional(test, consequent, alternate) => {
                if self.eval(test)?.truthy() {
                    self.eval(consequent)
                } else {
                    self.eval(alternate)
                }
            }
            Expr::Fallback(left, right) => self
                .eval(left)
                .filter(Value::truthy)
                .or_else(|| self.eval(right)),
        }
    }

    /// Evaluate `input`; `None` if it is outside the supported subset or
    /// references something unknown.
    pub fn evaluate(&self, input: &str) -> Option<Value<'a>> {
        self.eval(&parse(input)?)
    }

    /// Evaluate `input` to a string literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use elements_svg::expr::Scope;
    /// use elements_svg::props::Selection;
    /// use std::collections::BTreeMap;
    ///
    /// let selection = Selection::default();
    /// let bindings = BTreeMap::new();
    /// let scope = Scope::new(&selection, &bindings);
    /// assert_eq!(
    ///     scope.evaluate_str(r#"mode === "dark" ? "white" : "black""#),
    ///     Some("black".to_string())
    /// );
    /// assert_eq!(scope.evaluate_str("useTheme()"), None);
    /// ```
    pub fn evaluate_str(&self, input: &str) -> Option<String> {
        self.evaluate(input)?.into_string()
    }
}
