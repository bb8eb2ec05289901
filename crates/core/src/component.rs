//! Leaf component parsers: one scalar or array value from the token stream.

use crate::lexer::Token;
use crate::record::{Record, Value};
use crate::registry::{ComponentParser, DataParser};

/// Succeeds iff the next token is an integer literal.
pub fn integer() -> ComponentParser {
    ComponentParser::new(|_registry, cur| match cur.next() {
        Some((spanned, rest)) => match spanned.token {
            Token::Int(n) => Ok((Value::Int(n), rest)),
            ref other => Err(cur.err(format!("expected integer literal, got {:?}", other))),
        },
        None => Err(cur.err("expected integer literal, got end of input")),
    })
}

/// Succeeds iff the next token is a float literal.
pub fn float() -> ComponentParser {
    ComponentParser::new(|_registry, cur| match cur.next() {
        Some((spanned, rest)) => match spanned.token {
            Token::Float(f) => Ok((Value::Float(f), rest)),
            ref other => Err(cur.err(format!("expected float literal, got {:?}", other))),
        },
        None => Err(cur.err("expected float literal, got end of input")),
    })
}

/// Succeeds iff the next token is a string literal.
pub fn string() -> ComponentParser {
    ComponentParser::new(|_registry, cur| match cur.next() {
        Some((spanned, rest)) => match spanned.token {
            Token::Str(s) => Ok((Value::Str(s), rest)),
            other => Err(cur.err(format!("expected string literal, got {:?}", other))),
        },
        None => Err(cur.err("expected string literal, got end of input")),
    })
}

/// Comma-separated cells. The terminating semicolon is not consumed here; it
/// belongs to the field terminator that follows every field. A semicolon
/// with no cells before it is the zero-length array.
pub fn array_of(cell: ComponentParser) -> ComponentParser {
    ComponentParser::new(move |registry, start| {
        let mut items = Vec::new();
        if start.peek() == Some(Token::Semicolon) {
            return Ok((Value::Array(items), start.clone()));
        }
        let mut cur = start.clone();
        loop {
            let (value, rest) = cell.run(registry, &cur)?;
            items.push(value);
            match rest.peek() {
                Some(Token::Comma) => match rest.next() {
                    Some((_, after)) => cur = after,
                    None => return Err(rest.err("expected array cell, got end of input")),
                },
                Some(Token::Semicolon) => return Ok((Value::Array(items), rest)),
                other => {
                    return Err(rest.err(format!("expected ',' or ';' in array, got {:?}", other)))
                }
            }
        }
    })
}

/// Wraps a declared template's composed procedure: parses one full nested
/// instance starting from an empty record named after the template.
pub fn instance_of(type_name: impl Into<String>, parser: DataParser) -> ComponentParser {
    let type_name = type_name.into();
    ComponentParser::new(move |registry, cur| {
        let record = Record::new(type_name.clone());
        let (record, rest) = parser.run(registry, record, cur)?;
        Ok((Value::Record(record), rest))
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
