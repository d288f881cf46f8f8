//! Transport armor for the save-state codec.
//!
//! Wraps codec text for embedding in a save file: optional zlib compression
//! under base64. Loading walks three strategies, newest format generation
//! first, so saves written by earlier format generations still open:
//!
//! 1. base64 → inflate → decode
//! 2. inflate → decode
//! 3. decode the raw text
//!
//! A strategy is abandoned only when its unwrapping fails or the codec
//! reports malformed input. A trust failure from the codec is final and
//! propagates from whichever strategy reached it — the fallback walk never
//! converts "untrusted" into "try something else".

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use thiserror::Error;
use tracing::debug;

use savestate_codec::{
    decode, encode, CanNotSaveGameError, InvalidSaveGameError, SaveValue, TrustedRegistry,
};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Encode(#[from] CanNotSaveGameError),
    #[error(transparent)]
    Decode(#[from] InvalidSaveGameError),
    #[error("compression failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save-state is not valid UTF-8 text")]
    NotText,
}

/// Encode `root` and armor it for storage. With `use_compression` the codec
/// text is zlib-compressed and base64-encoded; without, it is emitted as-is.
pub fn build_transport_string(
    root: &SaveValue,
    registry: &TrustedRegistry,
    use_compression: bool,
) -> Result<String, TransportError> {
    let text = encode(root, registry)?;
    if !use_compression {
        return Ok(text);
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(BASE64.encode(compressed))
}

/// Load a transport string produced by any supported format generation.
pub fn load_transport_string(
    text: &str,
    registry: &TrustedRegistry,
) -> Result<SaveValue, TransportError> {
    load_transport_bytes(text.as_bytes(), registry)
}

/// Byte-level loader. Save files read from disk may carry the middle format
/// generation (bare zlib stream), which is not valid UTF-8.
pub fn load_transport_bytes(
    bytes: &[u8],
    registry: &TrustedRegistry,
) -> Result<SaveValue, TransportError> {
    // Newest generation: base64 armor over a zlib stream. Base64 is ASCII,
    // so non-text input cannot be this generation.
    if let Ok(text) = std::str::from_utf8(bytes) {
        match BASE64.decode(text.trim().as_bytes()) {
            Ok(compressed) => match inflate(&compressed) {
                Ok(plain) => match decode(&plain, registry) {
                    Ok(value) => return Ok(value),
                    Err(err @ InvalidSaveGameError::UntrustedClass(_)) => return Err(err.into()),
                    Err(err) => {
                        debug!(%err, "compressed save-state rejected, trying older formats");
                    }
                },
                Err(err) => debug!(%err, "base64 payload is not a zlib stream, trying older formats"),
            },
            Err(err) => debug!(%err, "save-state is not base64, trying older formats"),
        }
    }

    // Middle generation: bare zlib stream.
    if let Ok(plain) = inflate(bytes) {
        match decode(&plain, registry) {
            Ok(value) => return Ok(value),
            Err(err @ InvalidSaveGameError::UntrustedClass(_)) => return Err(err.into()),
            Err(err) => debug!(%err, "inflated save-state rejected, trying raw text"),
        }
    }

    // Oldest generation: raw codec text.
    let text = std::str::from_utf8(bytes).map_err(|_| TransportError::NotText)?;
    decode(text, registry).map_err(TransportError::from)
}

fn inflate(bytes: &[u8]) -> Result<String, std::io::Error> {
    let mut out = String::new();
    ZlibDecoder::new(bytes).read_to_string(&mut out)?;
    Ok(out)
}
