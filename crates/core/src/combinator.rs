//! Combinators that lift component parsers into record-parsing procedures
//! and chain those procedures together.
//!
//! A template's whole body becomes one procedure built from these four
//! pieces; parsing a data instance against a template is then a single call,
//! with no field-description structure left to interpret at runtime.

use crate::lexer::Token;
use crate::registry::{ComponentParser, DataParser};

/// Run the component parser and set its value as `components[name]` on the
/// incoming record. Failure propagates with the record untouched.
pub fn as_field(name: impl Into<String>, component: ComponentParser) -> DataParser {
    let name = name.into();
    DataParser::new(move |registry, mut record, cur| {
        let (value, rest) = component.run(registry, cur)?;
        record.set_component(&name, value);
        Ok((record, rest))
    })
}

/// Left-to-right sequencing, short-circuiting on the first failure.
pub fn sequence(first: DataParser, second: DataParser) -> DataParser {
    DataParser::new(move |registry, record, cur| {
        let (record, rest) = first.run(registry, record, cur)?;
        second.run(registry, record, &rest)
    })
}

/// The identity procedure: always succeeds, record and cursor unchanged.
pub fn empty() -> DataParser {
    DataParser::new(|_registry, record, cur| Ok((record, cur.clone())))
}

/// Requires and consumes exactly one semicolon, record unchanged.
pub fn literal_semicolon() -> DataParser {
    DataParser::new(|_registry, record, cur| match cur.expect(&[Token::Semicolon]) {
        Some(rest) => Ok((record, rest)),
        None => Err(cur.err(format!("expected ';', got {:?}", cur.peek()))),
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component;
    use crate::cursor::Cursor;
    use crate::lexer::lex;
    use crate::record::{Record, Value};
    use crate::registry::Registry;

    fn cursor(src: &str) -> Cursor {
        let tokens = lex(src, "test.x").expect("lex should succeed");
        Cursor::new(tokens, "test.x")
    }

    #[test]
    fn as_field_sets_the_component() {
        let registry = Registry::new();
        let p = as_field("n", component::integer());
        let (record, _) = p
            .run(&registry, Record::new("T"), &cursor("7"))
            .expect("field should parse");
        assert_eq!(record.components.get("n"), Some(&Value::Int(7)));
    }

    #[test]
    fn sequence_short_circuits() {
        let registry = Registry::new();
        let p = sequence(
            as_field("a", component::integer()),
            as_field("b", component::integer()),
        );
        let (record, _) = p
            .run(&registry, Record::new("T"), &cursor("1 2"))
            .expect("both fields should parse");
        assert_eq!(record.components.len(), 2);

        // First failure propagates; the second parser never runs.
        assert!(p
            .run(&registry, Record::new("T"), &cursor("1.5 2"))
            .is_err());
    }

    #[test]
    fn empty_changes_nothing() {
        let registry = Registry::new();
        let cur = cursor("1");
        let (record, rest) = empty()
            .run(&registry, Record::new("T"), &cur)
            .expect("empty always succeeds");
        assert!(record.components.is_empty());
        assert_eq!(rest.peek(), cur.peek());
    }

    #[test]
    fn literal_semicolon_requires_a_semicolon() {
        let registry = Registry::new();
        assert!(literal_semicolon()
            .run(&registry, Record::new("T"), &cursor(";"))
            .is_ok());
        assert!(literal_semicolon()
            .run(&registry, Record::new("T"), &cursor(","))
            .is_err());
    }
}
