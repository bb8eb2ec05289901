//! Top-level driver: template section, then data section, then end of input.
//!
//! The input has no separator between the two sections. The boundary is
//! discovered by trial: keep attempting "one more template declaration", and
//! when an attempt fails, re-read from the cursor it started at as data. A
//! fatal error (an unsupported construct) aborts instead.

use crate::cursor::Cursor;
use crate::data::{self, Instance};
use crate::error::ParseError;
use crate::lexer::{self, Token};
use crate::registry::Registry;
use crate::template;

/// Parse a fully materialized token cursor: template declarations first,
/// then data instances, then mandatory end of input.
pub fn parse(cursor: &Cursor) -> Result<Vec<Instance>, ParseError> {
    let mut registry = Registry::new();
    let mut cur = cursor.clone();
    loop {
        match template::parse_template(&cur, &mut registry) {
            Ok(rest) => cur = rest,
            Err(e) if e.is_fatal() => return Err(e),
            Err(_) => break, // phase boundary: re-read from `cur` as data
        }
    }
    let (instances, cur) = data::parse_data(&cur, &registry)?;
    let cur = match cur.expect(&[Token::Eof]) {
        Some(rest) => rest,
        None => return Err(cur.err(format!("expected end of input, got {:?}", cur.peek()))),
    };
    if !cur.at_end() {
        return Err(cur.err("trailing tokens after end of input"));
    }
    Ok(instances)
}

/// Lex and parse a complete .x text source.
pub fn parse_source(src: &str, filename: &str) -> Result<Vec<Instance>, ParseError> {
    let tokens = lexer::lex(src, filename)?;
    parse(&Cursor::new(tokens, filename))
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_then_data_then_eof() {
        let src = r#"
template Pt { <1234-5678> FLOAT v; }
Pt { 1.0; }
Pt second { 2.0; }
"#;
        let instances = parse_source(src, "test.x").expect("source should parse");
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[1].0.as_deref(), Some("second"));
    }

    #[test]
    fn empty_input_parses_to_nothing() {
        let instances = parse_source("", "test.x").expect("empty source should parse");
        assert!(instances.is_empty());
    }

    #[test]
    fn trailing_tokens_fail() {
        let src = "template Pt { <1234-5678> FLOAT v; } Pt { 1.0; } ;";
        assert!(parse_source(src, "test.x").is_err());
    }

    #[test]
    fn truncated_declaration_fails() {
        let src = "template Pt { <1234-5678> FLOAT v;";
        assert!(parse_source(src, "test.x").is_err());
    }

    #[test]
    fn truncated_instance_fails() {
        let src = "template Pt { <1234-5678> FLOAT v; } Pt { 1.0;";
        assert!(parse_source(src, "test.x").is_err());
    }

    #[test]
    fn fatal_declaration_error_is_not_a_phase_boundary() {
        // Without the fatal distinction this would fall through to the data
        // phase and fail with a plain syntax error instead.
        let src = "template Grid { <1234-5678> array WORD cells[4][4]; }";
        let err = parse_source(src, "test.x").unwrap_err();
        assert!(matches!(err, ParseError::Unsupported { .. }));
    }

    #[test]
    fn declarations_may_follow_other_declarations_only() {
        // A declaration after the first data instance is trailing garbage.
        let src = r#"
template Pt { <1234-5678> FLOAT v; }
Pt { 1.0; }
template Late { <1234-5678> FLOAT w; }
"#;
        assert!(parse_source(src, "test.x").is_err());
    }
}
