//! Data-instance parsing, driven by the registry built in the template phase.

use crate::cursor::{maybe_expect, require, take_name, Cursor};
use crate::error::ParseError;
use crate::lexer::Token;
use crate::record::{Child, Record};
use crate::registry::{DataParser, Registry};

/// One top-level data instance: an optional label and the parsed record.
pub type Instance = (Option<String>, Record);

/// Parse zero or more top-level named data instances. The loop ends, with
/// whatever has accumulated, as soon as the next token is not a name; there
/// is no count or sentinel in the input.
pub fn parse_data(cur: &Cursor, registry: &Registry) -> Result<(Vec<Instance>, Cursor), ParseError> {
    let mut instances = Vec::new();
    let mut cur = cur.clone();
    while matches!(cur.peek(), Some(Token::Name(_))) {
        let (instance, rest) = parse_instance(&cur, registry)?;
        instances.push(instance);
        cur = rest;
    }
    Ok((instances, cur))
}

fn parse_instance(cur: &Cursor, registry: &Registry) -> Result<(Instance, Cursor), ParseError> {
    let (type_name, cur) = take_name(cur)?;
    let (label, cur) = match cur.peek() {
        Some(Token::Name(_)) => {
            let (label, rest) = take_name(&cur)?;
            (Some(label), rest)
        }
        _ => (None, cur),
    };
    let cur = require(&cur, Token::LBrace, "'{'")?;
    let parser = registry
        .get(&type_name)
        .ok_or_else(|| cur.unresolved(type_name.as_str()))?;
    let (record, cur) = parser.run(registry, Record::new(type_name.as_str()), &cur)?;
    let cur = require(&cur, Token::RBrace, "'}'")?;
    Ok(((label, record), cur))
}

/// One nested-or-referenced child instance, as accepted inside restriction
/// bodies: `Name [label] { ... }` parses a full nested instance whose type
/// must be in `allowed`; `{ Name }` produces an unresolved name reference.
/// UUID forms are detected and rejected as unsupported.
///
/// `allowed` decides membership; `registry` is what the invoked procedure
/// sees, so nested open restrictions still match against everything.
pub(crate) fn parse_child(
    allowed: &Registry,
    registry: &Registry,
    cur: &Cursor,
) -> Result<(Child, Cursor), ParseError> {
    match cur.peek() {
        Some(Token::Name(_)) => {
            let (type_name, rest) = take_name(cur)?;
            let rest = match rest.peek() {
                Some(Token::Name(_)) => take_name(&rest)?.1,
                _ => rest,
            };
            let rest = require(&rest, Token::LBrace, "'{'")?;
            let parser = allowed
                .get(&type_name)
                .ok_or_else(|| rest.unresolved(type_name.as_str()))?;
            let (record, rest) = parser.run(registry, Record::new(type_name.as_str()), &rest)?;
            let rest = require(&rest, Token::RBrace, "'}'")?;
            Ok((Child::Record(record), rest))
        }
        Some(Token::LBrace) => {
            let rest = require(cur, Token::LBrace, "'{'")?;
            match rest.next() {
                Some((spanned, after)) => match spanned.token {
                    Token::Name(name) => {
                        if matches!(after.peek(), Some(Token::Uuid(_))) {
                            return Err(after.unsupported("name+UUID data reference"));
                        }
                        match maybe_expect(&[Token::RBrace], Some((name, after.clone()))) {
                            Some((name, done)) => Ok((Child::NameRef(name), done)),
                            None => Err(after.err(format!(
                                "expected '}}' after reference name, got {:?}",
                                after.peek()
                            ))),
                        }
                    }
                    Token::Uuid(_) => Err(rest.unsupported("UUID data reference")),
                    other => Err(rest.err(format!("expected reference name, got {:?}", other))),
                },
                None => Err(rest.err("expected reference name, got end of input")),
            }
        }
        other => Err(cur.err(format!("expected data instance, got {:?}", other))),
    }
}

/// Open restriction body: children of any registered template, in any order,
/// until one fails to match. The failing attempt is converted into loop
/// termination; the cursor stays at the position before that attempt.
pub(crate) fn open_restriction() -> DataParser {
    DataParser::new(|registry, mut record, start| {
        let mut cur = start.clone();
        loop {
            match parse_child(registry, registry, &cur) {
                Ok((child, rest)) => {
                    record.push_child(child);
                    cur = rest;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => return Ok((record, cur)),
            }
        }
    })
}

/// Closed restriction body: like [`open_restriction`], but only instances of
/// the templates captured in `allowed` (fixed at declaration time) match.
pub(crate) fn closed_restriction(allowed: Registry) -> DataParser {
    DataParser::new(move |registry, mut record, start| {
        let mut cur = start.clone();
        loop {
            match parse_child(&allowed, registry, &cur) {
                Ok((child, rest)) => {
                    record.push_child(child);
                    cur = rest;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(_) => return Ok((record, cur)),
            }
        }
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
