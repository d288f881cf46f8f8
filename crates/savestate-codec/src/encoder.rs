//! Save-state graph → tagged JSON text.

use serde_json::{Map as JsonMap, Value as Json};

use crate::constants::{
    starts_with_reserved, ENUM_PREFIX, FALSE_MARKER, FLOAT_PREFIX, INT_PREFIX, NONE_MARKER,
    OBJECT_PREFIX, PLACEHOLDER, SET_PREFIX, STR_ESCAPE, TRUE_MARKER, TUPLE_PREFIX,
};
use crate::error::CanNotSaveGameError;
use crate::escape::mask_quotes;
use crate::registry::TrustedRegistry;
use crate::value::{Persistable, SaveValue};

/// Recursive encoder over a trusted registry.
///
/// A pure transform: holds no state beyond the registry reference and
/// retains nothing of the encoded graph after [`encode`](Self::encode)
/// returns.
pub struct SaveGameEncoder<'a> {
    registry: &'a TrustedRegistry,
}

impl<'a> SaveGameEncoder<'a> {
    pub fn new(registry: &'a TrustedRegistry) -> Self {
        Self { registry }
    }

    /// Encode a full value graph to its transport text form.
    pub fn encode(&self, root: &SaveValue) -> Result<String, CanNotSaveGameError> {
        Ok(self.to_json(root)?.to_string())
    }

    fn to_json(&self, value: &SaveValue) -> Result<Json, CanNotSaveGameError> {
        match value {
            SaveValue::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.to_json(item)?);
                }
                Ok(Json::Array(out))
            }
            SaveValue::Map(pairs) => {
                let mut out = JsonMap::new();
                for (key, val) in pairs {
                    out.insert(self.key_text(key)?, self.to_json(val)?);
                }
                Ok(Json::Object(out))
            }
            SaveValue::Tuple(items) => Ok(Json::String(self.wrap_sequence(TUPLE_PREFIX, items)?)),
            SaveValue::Set(items) => Ok(Json::String(self.wrap_sequence(SET_PREFIX, items)?)),
            SaveValue::Object(obj) => Ok(Json::String(self.wrap_object(obj.as_ref())?)),
            scalar => Ok(Json::String(scalar_text(scalar)?)),
        }
    }

    /// Tagged key text for a mapping key. Keys are restricted to the kinds
    /// the source system can hash: scalars, enum members and tuples.
    fn key_text(&self, key: &SaveValue) -> Result<String, CanNotSaveGameError> {
        match key {
            SaveValue::Tuple(items) => self.wrap_sequence(TUPLE_PREFIX, items),
            other => scalar_text(other),
        }
    }

    /// Encode `items` as a JSON array, mask this level's quotes, and wrap
    /// the payload as `<prefix>(<payload>)`.
    fn wrap_sequence(
        &self,
        prefix: &str,
        items: &[SaveValue],
    ) -> Result<String, CanNotSaveGameError> {
        let mut encoded = Vec::with_capacity(items.len());
        for item in items {
            encoded.push(self.to_json(item)?);
        }
        let payload = Json::Array(encoded).to_string();
        Ok(format!("{prefix}({})", mask_quotes(&payload)))
    }

    fn wrap_object(&self, obj: &dyn Persistable) -> Result<String, CanNotSaveGameError> {
        let name = obj.class_name();
        if !self.registry.is_trusted(name) {
            return Err(CanNotSaveGameError::UntrustedClass(name.to_string()));
        }
        if name.contains(PLACEHOLDER) {
            return Err(CanNotSaveGameError::PlaceholderInString(PLACEHOLDER));
        }
        let state = obj.export_state();
        let mut out = JsonMap::new();
        for (attr, val) in &state {
            out.insert(plain_str_text(attr)?, self.to_json(val)?);
        }
        let payload = Json::Object(out).to_string();
        Ok(format!("{OBJECT_PREFIX}{name}({})", mask_quotes(&payload)))
    }
}

/// Marker-prefixed text form of a scalar. Containers are not scalars and
/// come back as unsupported-key errors (the only path that can reach this
/// with a container is a mapping key).
fn scalar_text(value: &SaveValue) -> Result<String, CanNotSaveGameError> {
    match value {
        SaveValue::None => Ok(NONE_MARKER.to_string()),
        SaveValue::Bool(true) => Ok(TRUE_MARKER.to_string()),
        SaveValue::Bool(false) => Ok(FALSE_MARKER.to_string()),
        SaveValue::Int(n) => Ok(format!("{INT_PREFIX}{n}")),
        SaveValue::Float(x) => Ok(format!("{FLOAT_PREFIX}{x:?}")),
        SaveValue::Enum(e) => {
            let text = format!("{ENUM_PREFIX}{}.{}", e.enum_type, e.member);
            if text.contains(PLACEHOLDER) {
                return Err(CanNotSaveGameError::PlaceholderInString(PLACEHOLDER));
            }
            Ok(text)
        }
        SaveValue::Str(s) => plain_str_text(s),
        SaveValue::List(_)
        | SaveValue::Map(_)
        | SaveValue::Tuple(_)
        | SaveValue::Set(_)
        | SaveValue::Object(_) => Err(CanNotSaveGameError::UnsupportedKey(value.kind())),
    }
}

/// Pass a plain string through, escaping a reserved-marker collision and
/// refusing the placeholder character outright.
fn plain_str_text(s: &str) -> Result<String, CanNotSaveGameError> {
    if s.contains(PLACEHOLDER) {
        return Err(CanNotSaveGameError::PlaceholderInString(PLACEHOLDER));
    }
    if starts_with_reserved(s) {
        return Ok(format!("{STR_ESCAPE}{s}"));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_texts() {
        assert_eq!(scalar_text(&SaveValue::Int(5)).unwrap(), "__INT__5");
        assert_eq!(scalar_text(&SaveValue::Int(-3)).unwrap(), "__INT__-3");
        assert_eq!(scalar_text(&SaveValue::Float(1.5)).unwrap(), "__FLOAT__1.5");
        assert_eq!(scalar_text(&SaveValue::Bool(true)).unwrap(), "__TRUE__");
        assert_eq!(scalar_text(&SaveValue::Bool(false)).unwrap(), "__FALSE__");
        assert_eq!(scalar_text(&SaveValue::None).unwrap(), "__NONE__");
        assert_eq!(scalar_text(&SaveValue::from("plain")).unwrap(), "plain");
    }

    #[test]
    fn colliding_string_is_escaped() {
        assert_eq!(
            plain_str_text("__INT__not_a_number").unwrap(),
            "__STR____INT__not_a_number"
        );
        assert_eq!(plain_str_text("__STR__x").unwrap(), "__STR____STR__x");
    }

    #[test]
    fn placeholder_in_string_is_refused() {
        assert_eq!(
            plain_str_text("price: $5"),
            Err(CanNotSaveGameError::PlaceholderInString('$'))
        );
    }
}
