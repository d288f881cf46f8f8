//! Tagged JSON text → save-state graph.

use serde_json::Value as Json;

use crate::constants::{
    starts_with_reserved, ENUM_PREFIX, FALSE_MARKER, FLOAT_PREFIX, INT_PREFIX, NONE_MARKER,
    OBJECT_PREFIX, SET_PREFIX, STR_ESCAPE, TRUE_MARKER, TUPLE_PREFIX,
};
use crate::error::InvalidSaveGameError;
use crate::escape::restore_quotes;
use crate::registry::TrustedRegistry;
use crate::value::{EnumValue, SaveState, SaveValue};

/// Recursive decoder over a trusted registry.
///
/// Decode is all-or-nothing per call: any malformation surfaces as an error,
/// never as a partially reconstructed graph or a substituted default.
pub struct SaveGameDecoder<'a> {
    registry: &'a TrustedRegistry,
}

impl<'a> SaveGameDecoder<'a> {
    pub fn new(registry: &'a TrustedRegistry) -> Self {
        Self { registry }
    }

    /// Decode transport text back into a value graph.
    pub fn decode(&self, text: &str) -> Result<SaveValue, InvalidSaveGameError> {
        let json: Json = serde_json::from_str(text)?;
        self.from_json(&json)
    }

    fn from_json(&self, json: &Json) -> Result<SaveValue, InvalidSaveGameError> {
        match json {
            Json::String(text) => self.decode_text(text),
            Json::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.from_json(item)?);
                }
                Ok(SaveValue::List(out))
            }
            Json::Object(map) => {
                let mut pairs = Vec::with_capacity(map.len());
                for (key, val) in map {
                    pairs.push((self.decode_text(key)?, self.from_json(val)?));
                }
                Ok(SaveValue::Map(pairs))
            }
            // The current format carries every scalar as a tagged string;
            // bare JSON scalars appear only in saves that predate tagging.
            Json::Null => Ok(SaveValue::None),
            Json::Bool(b) => Ok(SaveValue::Bool(*b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(SaveValue::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(SaveValue::Float(f))
                } else {
                    Err(InvalidSaveGameError::MalformedTag(n.to_string()))
                }
            }
        }
    }

    /// Reinterpret a wire string by its tag prefix; untagged text is an
    /// opaque plain string.
    fn decode_text(&self, text: &str) -> Result<SaveValue, InvalidSaveGameError> {
        if text == NONE_MARKER {
            return Ok(SaveValue::None);
        }
        if text == TRUE_MARKER {
            return Ok(SaveValue::Bool(true));
        }
        if text == FALSE_MARKER {
            return Ok(SaveValue::Bool(false));
        }
        if let Some(rest) = text.strip_prefix(INT_PREFIX) {
            return rest
                .parse::<i64>()
                .map(SaveValue::Int)
                .map_err(|_| InvalidSaveGameError::MalformedInt(rest.to_string()));
        }
        if let Some(rest) = text.strip_prefix(FLOAT_PREFIX) {
            return rest
                .parse::<f64>()
                .map(SaveValue::Float)
                .map_err(|_| InvalidSaveGameError::MalformedFloat(rest.to_string()));
        }
        if let Some(rest) = text.strip_prefix(ENUM_PREFIX) {
            return self.decode_enum(rest);
        }
        if let Some(rest) = text.strip_prefix(TUPLE_PREFIX) {
            return self.unwrap_sequence(rest, text).map(SaveValue::Tuple);
        }
        if let Some(rest) = text.strip_prefix(SET_PREFIX) {
            return self.unwrap_sequence(rest, text).map(SaveValue::Set);
        }
        if let Some(rest) = text.strip_prefix(OBJECT_PREFIX) {
            return self.decode_object(rest, text);
        }
        if let Some(rest) = text.strip_prefix(STR_ESCAPE) {
            // The escape covers exactly one marker collision; no re-dispatch.
            return Ok(SaveValue::Str(rest.to_string()));
        }
        if starts_with_reserved(text) {
            // Reserved-looking text that matched no rule, e.g. `__TRUE__x`.
            return Err(InvalidSaveGameError::MalformedTag(text.to_string()));
        }
        Ok(SaveValue::Str(text.to_string()))
    }

    fn decode_enum(&self, rest: &str) -> Result<SaveValue, InvalidSaveGameError> {
        // Member sits after the last dot; dotted enum type names stay intact.
        let Some((enum_type, member)) = rest.rsplit_once('.') else {
            return Err(InvalidSaveGameError::MalformedEnum(rest.to_string()));
        };
        let Some(members) = self.registry.enum_members(enum_type) else {
            return Err(InvalidSaveGameError::UnknownEnumType(enum_type.to_string()));
        };
        if !members.iter().any(|m| m == member) {
            return Err(InvalidSaveGameError::UnknownEnumMember {
                enum_type: enum_type.to_string(),
                member: member.to_string(),
            });
        }
        Ok(SaveValue::Enum(EnumValue::new(enum_type, member)))
    }

    /// Unwrap `(<payload>)`, restore this level's quotes, and re-parse the
    /// payload as a JSON array of elements.
    fn unwrap_sequence(
        &self,
        rest: &str,
        whole: &str,
    ) -> Result<Vec<SaveValue>, InvalidSaveGameError> {
        let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) else {
            return Err(InvalidSaveGameError::MalformedTag(whole.to_string()));
        };
        let restored = restore_quotes(inner);
        match serde_json::from_str::<Json>(&restored)? {
            Json::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in &items {
                    out.push(self.from_json(item)?);
                }
                Ok(out)
            }
            _ => Err(InvalidSaveGameError::MalformedTag(whole.to_string())),
        }
    }

    fn decode_object(&self, rest: &str, whole: &str) -> Result<SaveValue, InvalidSaveGameError> {
        let Some((name, payload)) = rest.split_once('(') else {
            return Err(InvalidSaveGameError::MalformedTag(whole.to_string()));
        };
        // Trust is decided before the payload is looked at; an untrusted
        // name fails identically however well-formed the rest may be.
        let Some(factory) = self.registry.factory(name) else {
            return Err(InvalidSaveGameError::UntrustedClass(name.to_string()));
        };
        let Some(inner) = payload.strip_suffix(')') else {
            return Err(InvalidSaveGameError::MalformedTag(whole.to_string()));
        };
        let restored = restore_quotes(inner);
        let Json::Object(map) = serde_json::from_str::<Json>(&restored)? else {
            return Err(InvalidSaveGameError::StateNotAMapping(name.to_string()));
        };
        let mut state = SaveState::with_capacity(map.len());
        for (key, val) in &map {
            let SaveValue::Str(attr) = self.decode_text(key)? else {
                return Err(InvalidSaveGameError::StateKeyNotAString {
                    class: name.to_string(),
                    key: key.clone(),
                });
            };
            state.insert(attr, self.from_json(val)?);
        }
        let mut instance = factory();
        instance.import_state(state)?;
        Ok(SaveValue::Object(instance))
    }
}
