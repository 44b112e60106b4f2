use crate::error::GenError;
use crate::utils::quote;

/// One schema line, classified by shape only.
#[derive(Debug, PartialEq, Eq)]
pub struct Line<'a> {
    pub number:   usize,
    pub indented: bool,
    pub kind:     LineKind<'a>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment(&'a str),
    /// Text ending in `:`, with the colon removed.
    Header(&'a str),
    /// Anything else, trimmed on both sides.
    Text(&'a str),
}

#[derive(Debug, PartialEq, Eq)]
pub struct FieldTokens<'a> {
    pub name:    &'a str,
    pub type_:   &'a str,
    pub mutable: bool,
}

/// A type token such as `u32`, `char[8]` or `optional<f64[2]>`.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeToken<'a> {
    pub optional: bool,
    pub name:     &'a str,
    pub len:      Option<usize>,
}

pub fn classify_line(text: &str, number: usize) -> Line<'_> {
    let indented = text.starts_with(char::is_whitespace);
    let trimmed = text.trim();

    let kind = if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        LineKind::Comment(&trimmed[1..trimmed.len() - 1])
    } else if trimmed.ends_with(':') {
        LineKind::Header(&trimmed[..trimmed.len() - 1])
    } else {
        LineKind::Text(trimmed)
    };

    Line { number, indented, kind }
}

/// Splits `name type [mut]`.
pub fn split_field(text: &str, line: usize) -> Result<FieldTokens<'_>, GenError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    match parts.as_slice() {
        [name, type_] => Ok(FieldTokens { name: *name, type_: *type_, mutable: false }),
        [name, type_, "mut"] => Ok(FieldTokens { name: *name, type_: *type_, mutable: true }),
        [_, _, other] => Err(GenError::SyntaxError {
            msg: format!("Expected \"mut\" but found {}", quote(other)),
            line,
        }),
        _ => Err(GenError::SyntaxError {
            msg: format!("Expected \"name type [mut]\" but found {}", quote(text)),
            line,
        }),
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos:  usize,
}

impl<'a> Cursor<'a> {
    fn eat(&mut self, expected: &str) -> bool {
        if self.text[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, test: impl Fn(char) -> bool) -> &'a str {
        let rest = &self.text[self.pos..];
        let len = rest.find(|c: char| !test(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

pub fn parse_type_token(token: &str, line: usize) -> Result<TypeToken<'_>, GenError> {
    let syntax = |msg: String| GenError::SyntaxError { msg, line };
    let mut cursor = Cursor { text: token, pos: 0 };

    let optional = cursor.eat("optional<");

    let name = cursor.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
    if name.is_empty() {
        return Err(syntax(format!("Expected type name in {}", quote(token))));
    }

    let mut len = None;
    if cursor.eat("[") {
        let digits = cursor.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() || !cursor.eat("]") {
            return Err(syntax(format!("Expected \"[length]\" in {}", quote(token))));
        }
        match digits.parse::<usize>() {
            Ok(n) if n > 0 => len = Some(n),
            _ => {
                return Err(GenError::InvalidArrayLength {
                    token: digits.to_string(),
                    line,
                })
            }
        }
    }

    if optional && !cursor.eat(">") {
        return Err(syntax(format!("Expected \">\" to close {}", quote(token))));
    }

    if !cursor.rest().is_empty() {
        return Err(syntax(format!(
            "Unexpected {} in type {}",
            quote(cursor.rest()),
            quote(token)
        )));
    }

    Ok(TypeToken { optional, name, len })
}
