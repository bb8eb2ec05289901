//! Composed parsing procedures and the template registry.
//!
//! A template's parsing procedure and the registry refer to each other: the
//! registry stores procedures, and every procedure receives the registry when
//! it runs (this is what lets templates declared early accept children of
//! templates declared later, once the registry is complete). The newtype
//! wrappers below provide the indirection that breaks the type cycle.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::record::{Record, Value};

type DataParserFn = dyn Fn(&Registry, Record, &Cursor) -> Result<(Record, Cursor), ParseError>;

/// A record-parsing procedure: runs component parsers against the token
/// stream, extending the record it was handed. Composed at template
/// declaration time, invoked at data-parsing time.
#[derive(Clone)]
pub struct DataParser(Rc<DataParserFn>);

impl DataParser {
    pub fn new(
        f: impl Fn(&Registry, Record, &Cursor) -> Result<(Record, Cursor), ParseError> + 'static,
    ) -> Self {
        DataParser(Rc::new(f))
    }

    pub fn run(
        &self,
        registry: &Registry,
        record: Record,
        cursor: &Cursor,
    ) -> Result<(Record, Cursor), ParseError> {
        (self.0)(registry, record, cursor)
    }
}

impl fmt::Debug for DataParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DataParser(..)")
    }
}

type ComponentParserFn = dyn Fn(&Registry, &Cursor) -> Result<(Value, Cursor), ParseError>;

/// A leaf parsing procedure producing one field value.
#[derive(Clone)]
pub struct ComponentParser(Rc<ComponentParserFn>);

impl ComponentParser {
    pub fn new(
        f: impl Fn(&Registry, &Cursor) -> Result<(Value, Cursor), ParseError> + 'static,
    ) -> Self {
        ComponentParser(Rc::new(f))
    }

    pub fn run(
        &self,
        registry: &Registry,
        cursor: &Cursor,
    ) -> Result<(Value, Cursor), ParseError> {
        (self.0)(registry, cursor)
    }
}

impl fmt::Debug for ComponentParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ComponentParser(..)")
    }
}

/// The environment: template name to composed parsing procedure.
///
/// Grows one entry per successfully parsed `template` block, then is only
/// read (every parser signature takes `&Registry`) while data is parsed.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, DataParser>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, parser: DataParser) {
        self.entries.insert(name.into(), parser);
    }

    pub fn get(&self, name: &str) -> Option<&DataParser> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
