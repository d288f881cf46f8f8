//! In-memory save-state value model.
//!
//! The wire format's string prefix tags are a serialization detail; in memory
//! the save-state is a genuine sum type.

use std::fmt;

use indexmap::IndexMap;

use crate::error::InvalidSaveGameError;

/// Attribute mapping exported from and imported into persistable objects.
/// Attribute order is preserved across a save/load cycle.
pub type SaveState = IndexMap<String, SaveValue>;

/// An enum member, identified by enum type name and member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub enum_type: String,
    pub member: String,
}

impl EnumValue {
    pub fn new(enum_type: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            enum_type: enum_type.into(),
            member: member.into(),
        }
    }
}

/// A state-export/import capable object the codec may persist.
///
/// Implementations are reachable only through a
/// [`TrustedRegistry`](crate::TrustedRegistry) entry; an unregistered
/// implementation can neither be saved nor loaded.
pub trait Persistable: fmt::Debug {
    /// Fully qualified class name; the registry key.
    fn class_name(&self) -> &'static str;

    /// Export the attribute mapping to persist.
    fn export_state(&self) -> SaveState;

    /// Consume a decoded attribute mapping. Called on a blank instance
    /// produced by the registered factory.
    fn import_state(&mut self, state: SaveState) -> Result<(), InvalidSaveGameError>;

    fn clone_boxed(&self) -> Box<dyn Persistable>;
}

impl Clone for Box<dyn Persistable> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// The value union the codec transforms.
///
/// `List` and `Tuple` compare element-wise in order; `Set` and `Map` carry
/// their elements in encounter order but compare by membership.
#[derive(Debug, Clone)]
pub enum SaveValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<SaveValue>),
    Map(Vec<(SaveValue, SaveValue)>),
    Tuple(Vec<SaveValue>),
    Set(Vec<SaveValue>),
    Enum(EnumValue),
    Object(Box<dyn Persistable>),
}

impl SaveValue {
    /// Variant name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SaveValue::None => "none",
            SaveValue::Bool(_) => "bool",
            SaveValue::Int(_) => "int",
            SaveValue::Float(_) => "float",
            SaveValue::Str(_) => "str",
            SaveValue::List(_) => "list",
            SaveValue::Map(_) => "map",
            SaveValue::Tuple(_) => "tuple",
            SaveValue::Set(_) => "set",
            SaveValue::Enum(_) => "enum",
            SaveValue::Object(_) => "object",
        }
    }
}

impl PartialEq for SaveValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SaveValue::None, SaveValue::None) => true,
            (SaveValue::Bool(a), SaveValue::Bool(b)) => a == b,
            (SaveValue::Int(a), SaveValue::Int(b)) => a == b,
            (SaveValue::Float(a), SaveValue::Float(b)) => a == b,
            (SaveValue::Str(a), SaveValue::Str(b)) => a == b,
            (SaveValue::List(a), SaveValue::List(b)) => a == b,
            (SaveValue::Tuple(a), SaveValue::Tuple(b)) => a == b,
            (SaveValue::Set(a), SaveValue::Set(b)) => {
                a.len() == b.len()
                    && a.iter().all(|x| b.contains(x))
                    && b.iter().all(|x| a.contains(x))
            }
            (SaveValue::Map(a), SaveValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(bk, bv)| k == bk && v == bv))
            }
            (SaveValue::Enum(a), SaveValue::Enum(b)) => a == b,
            (SaveValue::Object(a), SaveValue::Object(b)) => {
                a.class_name() == b.class_name() && a.export_state() == b.export_state()
            }
            _ => false,
        }
    }
}

impl From<bool> for SaveValue {
    fn from(v: bool) -> Self {
        SaveValue::Bool(v)
    }
}

impl From<i64> for SaveValue {
    fn from(v: i64) -> Self {
        SaveValue::Int(v)
    }
}

impl From<f64> for SaveValue {
    fn from(v: f64) -> Self {
        SaveValue::Float(v)
    }
}

impl From<&str> for SaveValue {
    fn from(v: &str) -> Self {
        SaveValue::Str(v.to_string())
    }
}

impl From<String> for SaveValue {
    fn from(v: String) -> Self {
        SaveValue::Str(v)
    }
}

impl From<EnumValue> for SaveValue {
    fn from(v: EnumValue) -> Self {
        SaveValue::Enum(v)
    }
}

impl From<Vec<SaveValue>> for SaveValue {
    fn from(v: Vec<SaveValue>) -> Self {
        SaveValue::List(v)
    }
}
