//! Trusted save-state serialization codec.
//!
//! Persists an AI agent's in-memory state as a single opaque string and
//! reconstructs it bit-for-bit on load, across process restarts and
//! potentially hostile input. Scalars ride as marker-prefixed tags over a
//! JSON substrate; tuples, sets and object state ride as escaped nested
//! literals; decode instantiates only classes present in the
//! [`TrustedRegistry`].
//!
//! The codec is a pure, synchronous transform. It performs no I/O and keeps
//! no state across calls beyond the registry handed to it, which must not be
//! mutated while a call is in flight.

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod registry;
pub mod value;

pub use decoder::SaveGameDecoder;
pub use encoder::SaveGameEncoder;
pub use error::{CanNotSaveGameError, InvalidSaveGameError};
pub use registry::{BlankFactory, TrustedRegistry};
pub use value::{EnumValue, Persistable, SaveState, SaveValue};

/// Encode a value graph to its transport text form.
pub fn encode(root: &SaveValue, registry: &TrustedRegistry) -> Result<String, CanNotSaveGameError> {
    SaveGameEncoder::new(registry).encode(root)
}

/// Decode transport text back into a value graph.
pub fn decode(text: &str, registry: &TrustedRegistry) -> Result<SaveValue, InvalidSaveGameError> {
    SaveGameDecoder::new(registry).decode(text)
}
