//! Template-declaration parsing.
//!
//! Each declaration line of a template body contributes one small runtime
//! procedure; the whole body becomes their left-to-right [`sequence`]
//! composition, keyed by the template name in the registry. There is no
//! descriptive field-list structure built along the way — the composed
//! procedure *is* the template's representation.

use crate::combinator::{as_field, empty, literal_semicolon, sequence};
use crate::component;
use crate::cursor::{require, take_name, Cursor};
use crate::data::{closed_restriction, open_restriction};
use crate::error::ParseError;
use crate::lexer::{Primitive, Token};
use crate::registry::{ComponentParser, DataParser, Registry};

/// Parse one `template NAME { UUID field-decls }` block and insert the
/// composed procedure for its body into the registry. The registry is only
/// touched when the whole block parsed.
pub fn parse_template(cur: &Cursor, registry: &mut Registry) -> Result<Cursor, ParseError> {
    let cur = require(cur, Token::Template, "'template'")?;
    let (name, cur) = take_name(&cur)?;
    let cur = require(&cur, Token::LBrace, "'{'")?;
    let cur = take_uuid(&cur)?;
    let (parser, cur) = parse_template_body(&cur, registry)?;
    registry.insert(name, parser);
    Ok(cur)
}

fn take_uuid(cur: &Cursor) -> Result<Cursor, ParseError> {
    match cur.next() {
        Some((spanned, rest)) if matches!(spanned.token, Token::Uuid(_)) => Ok(rest),
        _ => Err(cur.err(format!("expected UUID, got {:?}", cur.peek()))),
    }
}

/// Recursive core: consume one declaration line, then recurse on the rest of
/// the body and sequence the two. Returns the procedure for everything up to
/// and including the closing `}`.
pub fn parse_template_body(
    cur: &Cursor,
    registry: &Registry,
) -> Result<(DataParser, Cursor), ParseError> {
    let Some((spanned, rest)) = cur.next() else {
        return Err(cur.err("unexpected end of input in template body"));
    };
    match spanned.token {
        Token::RBrace => Ok((empty(), rest)),
        Token::Prim(prim) => {
            let component = primitive_component(prim, cur)?;
            let (field_name, rest) = take_name(&rest)?;
            finish_field(field_name, component, &rest, registry)
        }
        Token::Name(type_name) => {
            let parser = registry
                .get(&type_name)
                .ok_or_else(|| cur.unresolved(type_name.as_str()))?
                .clone();
            let component = component::instance_of(type_name, parser);
            let (field_name, rest) = take_name(&rest)?;
            finish_field(field_name, component, &rest, registry)
        }
        Token::Array => array_declaration(&rest, registry),
        Token::LBracket => restriction_declaration(&rest, registry),
        other => Err(cur.err(format!("unexpected {:?} in template body", other))),
    }
}

/// After `field_name`: require the declaration's `;`, recurse on the
/// remaining body, and compose `field-setter >>> semicolon >>> rest`.
fn finish_field(
    field_name: String,
    component: ComponentParser,
    cur: &Cursor,
    registry: &Registry,
) -> Result<(DataParser, Cursor), ParseError> {
    let cur = require(cur, Token::Semicolon, "';'")?;
    let (rest_parser, cur) = parse_template_body(&cur, registry)?;
    let parser = sequence(
        sequence(as_field(field_name, component), literal_semicolon()),
        rest_parser,
    );
    Ok((parser, cur))
}

/// `array CELL-TYPE name [ size ] ;` — the cell type is a primitive keyword
/// or an already-registered template, resolved now. The declared size is
/// accepted and discarded: the runtime length comes from the data section's
/// comma structure alone.
fn array_declaration(
    cur: &Cursor,
    registry: &Registry,
) -> Result<(DataParser, Cursor), ParseError> {
    let Some((spanned, rest)) = cur.next() else {
        return Err(cur.err("expected array cell type, got end of input"));
    };
    let cell = match spanned.token {
        Token::Prim(prim) => primitive_component(prim, cur)?,
        Token::Name(type_name) => {
            let parser = registry
                .get(&type_name)
                .ok_or_else(|| cur.unresolved(type_name.as_str()))?
                .clone();
            component::instance_of(type_name, parser)
        }
        other => return Err(cur.err(format!("expected array cell type, got {:?}", other))),
    };
    let (field_name, cur) = take_name(&rest)?;
    let cur = require(&cur, Token::LBracket, "'['")?;
    let cur = match cur.next() {
        Some((spanned, rest)) if matches!(spanned.token, Token::Int(_) | Token::Name(_)) => rest,
        _ => return Err(cur.err(format!("expected array size, got {:?}", cur.peek()))),
    };
    let cur = require(&cur, Token::RBracket, "']'")?;
    if cur.peek() == Some(Token::LBracket) {
        return Err(cur.unsupported("multi-dimensional array"));
    }
    finish_field(field_name, component::array_of(cell), &cur, registry)
}

/// `[ . . . ]` or `[ Name (, Name)* ]` — either way the restriction is the
/// final element of the body, so the closing `}` follows immediately.
fn restriction_declaration(
    cur: &Cursor,
    registry: &Registry,
) -> Result<(DataParser, Cursor), ParseError> {
    if let Some(after) = cur.expect(&[Token::Dot, Token::Dot, Token::Dot, Token::RBracket]) {
        let after = require(&after, Token::RBrace, "'}'")?;
        return Ok((open_restriction(), after));
    }
    let mut allowed = Registry::new();
    let mut cur = cur.clone();
    loop {
        let (name, rest) = take_name(&cur)?;
        // Optional UUID after the name, ignored
        let rest = match rest.peek() {
            Some(Token::Uuid(_)) => match rest.next() {
                Some((_, after)) => after,
                None => rest,
            },
            _ => rest,
        };
        match registry.get(&name) {
            Some(parser) => allowed.insert(name, parser.clone()),
            None => return Err(cur.unresolved(name)),
        }
        match rest.next() {
            Some((spanned, after)) => match spanned.token {
                Token::Comma => cur = after,
                Token::RBracket => {
                    cur = after;
                    break;
                }
                other => {
                    return Err(
                        rest.err(format!("expected ',' or ']' in restriction, got {:?}", other))
                    )
                }
            },
            None => return Err(rest.err("unexpected end of input in restriction")),
        }
    }
    let cur = require(&cur, Token::RBrace, "'}'")?;
    Ok((closed_restriction(allowed), cur))
}

fn primitive_component(prim: Primitive, cur: &Cursor) -> Result<ComponentParser, ParseError> {
    match prim {
        Primitive::Word | Primitive::Dword | Primitive::Sword | Primitive::Sdword => {
            Ok(component::integer())
        }
        Primitive::Float | Primitive::Double => Ok(component::float()),
        Primitive::NString => Ok(component::string()),
        other => Err(cur.err(format!("no component parser for field type {:?}", other))),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
