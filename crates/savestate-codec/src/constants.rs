//! Wire-format marker table.
//!
//! Process-wide constants. Encode and decode must agree on these; they are
//! never configurable per call.

/// Integer marker: `__INT__<decimal>`.
pub const INT_PREFIX: &str = "__INT__";

/// Float marker: `__FLOAT__<repr>`.
pub const FLOAT_PREFIX: &str = "__FLOAT__";

/// Exact marker for boolean `true`.
pub const TRUE_MARKER: &str = "__TRUE__";

/// Exact marker for boolean `false`.
pub const FALSE_MARKER: &str = "__FALSE__";

/// Exact marker for the none value.
pub const NONE_MARKER: &str = "__NONE__";

/// Enum member marker: `__ENUM__<Type>.<Member>`.
pub const ENUM_PREFIX: &str = "__ENUM__";

/// Tuple literal marker: `__TUPLE__(<payload>)`.
pub const TUPLE_PREFIX: &str = "__TUPLE__";

/// Set literal marker: `__SET__(<payload>)`.
pub const SET_PREFIX: &str = "__SET__";

/// Trusted object marker: `__OBJECT__<fully.qualified.Name>(<payload>)`.
pub const OBJECT_PREFIX: &str = "__OBJECT__";

/// Escape marker for plain strings that would otherwise read as a tag.
pub const STR_ESCAPE: &str = "__STR__";

/// Placeholder substituted for `"` inside wrapped literals.
pub const PLACEHOLDER: char = '$';

/// Every reserved marker a plain string may collide with.
pub const RESERVED_MARKERS: [&str; 10] = [
    INT_PREFIX,
    FLOAT_PREFIX,
    TRUE_MARKER,
    FALSE_MARKER,
    NONE_MARKER,
    ENUM_PREFIX,
    TUPLE_PREFIX,
    SET_PREFIX,
    OBJECT_PREFIX,
    STR_ESCAPE,
];

/// True if `text` begins with any reserved marker.
pub fn starts_with_reserved(text: &str) -> bool {
    RESERVED_MARKERS.iter().any(|m| text.starts_with(m))
}
