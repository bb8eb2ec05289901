//! Parsed representation of data instances.

use serde::Serialize;
use std::collections::BTreeMap;

/// A field value. The set of producible kinds is closed: scalars, arrays of
/// values, and fully parsed nested records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Value>),
    Record(Record),
}

/// One child of a data instance: either a nested instance or a symbolic
/// reference to another instance by name. Name references are emitted
/// unresolved; resolving them against sibling instances is out of scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Record(Record),
    NameRef(String),
}

/// The parsed representation of one data instance.
///
/// `type_name` is set at creation and never changes. `components` and
/// `children` only grow while the instance's composed procedure runs; a
/// finished record is never mutated again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub type_name: String,
    pub components: BTreeMap<String, Value>,
    pub children: Vec<Child>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Record {
            type_name: type_name.into(),
            components: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn set_component(&mut self, name: &str, value: Value) {
        self.components.insert(name.to_owned(), value);
    }

    pub fn push_child(&mut self, child: Child) {
        self.children.push(child);
    }
}
