//! Encoding and decoding of level and archive files.

use prost::Message;
use thiserror::Error;

use crate::level::Level;
use crate::nanim::Nanim;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to decode {kind} message: {source}")]
    Decode {
        kind: &'static str,
        #[source]
        source: prost::DecodeError,
    },
}

/// Serialize a level into the bytes of a level file.
pub fn encode_level(level: &Level) -> Vec<u8> {
    level.encode_to_vec()
}

/// Parse the bytes of a level file.
pub fn decode_level(bytes: &[u8]) -> Result<Level, SchemaError> {
    Level::decode(bytes).map_err(|source| SchemaError::Decode {
        kind: "Level",
        source,
    })
}

/// Serialize an animation archive into the bytes of a `.nanim` file.
pub fn encode_nanim(nanim: &Nanim) -> Vec<u8> {
    nanim.encode_to_vec()
}

/// Parse the bytes of a `.nanim` file.
pub fn decode_nanim(bytes: &[u8]) -> Result<Nanim, SchemaError> {
    Nanim::decode(bytes).map_err(|source| SchemaError::Decode {
        kind: "Nanim",
        source,
    })
}
