//! The trusted class and enum registry.
//!
//! Registration is the security control: decode instantiates classes and
//! resolves enum members only through this table, and encode refuses any
//! object whose class is absent. There is no fallback lookup of any kind.
//!
//! The registry is immutable once handed to an encode or decode call; shared
//! references across threads are safe (the table holds `fn` pointers and
//! owned strings only).

use std::collections::HashMap;

use crate::value::Persistable;

/// Factory producing a blank instance, bypassing any domain constructor.
pub type BlankFactory = fn() -> Box<dyn Persistable>;

#[derive(Debug, Default)]
pub struct TrustedRegistry {
    classes: HashMap<&'static str, BlankFactory>,
    enums: HashMap<String, Vec<String>>,
}

impl TrustedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a persistable class. The factory's own `class_name` is the
    /// registry key; registering the same class twice replaces the factory.
    pub fn register(&mut self, factory: BlankFactory) {
        let name = factory().class_name();
        self.classes.insert(name, factory);
    }

    /// Register an enum type and its member names for decode resolution.
    pub fn register_enum(&mut self, enum_type: impl Into<String>, members: &[&str]) {
        self.enums.insert(
            enum_type.into(),
            members.iter().map(|m| (*m).to_string()).collect(),
        );
    }

    /// True if `class_name` may be encoded and decoded.
    pub fn is_trusted(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Blank-instance factory for a trusted class.
    pub(crate) fn factory(&self, class_name: &str) -> Option<BlankFactory> {
        self.classes.get(class_name).copied()
    }

    /// Member table for an enum type, if registered.
    pub(crate) fn enum_members(&self, enum_type: &str) -> Option<&[String]> {
        self.enums.get(enum_type).map(Vec::as_slice)
    }
}
