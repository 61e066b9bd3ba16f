//! Binary ⇄ text codec used to carry raw bytes over the text-only channel.
//!
//! Parts travel as standard-alphabet base64. The client posts padded text;
//! the server answers with unpadded text, so the decoder accepts either.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

/// Standard-alphabet engine that emits padding but decodes with or without it.
const WIRE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encoded-to-raw size ratio of the codec: 4 text bytes carry 3 raw bytes.
///
/// The server declares its part size in terms of the encoded body it will
/// accept; the raw window sliced from the source must be scaled down by this
/// ratio so the encoded payload still fits.
pub const RAW_PER_ENCODED: (u64, u64) = (3, 4);

/// Decoding failed because the text was malformed or truncated.
#[derive(Debug, Error)]
#[error("invalid part encoding: {0}")]
pub struct CodecError(#[from] base64::DecodeError);

/// Encodes raw bytes into a transport-safe text payload.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    WIRE.encode(bytes)
}

/// Decodes a text payload back into raw bytes.
///
/// # Errors
///
/// Returns [`CodecError`] if the text is not valid base64.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    Ok(WIRE.decode(text)?)
}

/// Scales a server-declared encoded-body capacity down to the raw byte count
/// that fits inside it after encoding.
///
/// Only whole 4-character groups count: the encoder pads partial groups up
/// to 4 characters, so a fractional group would overrun the capacity.
#[must_use]
pub const fn effective_part_size(declared: u64) -> u64 {
    declared / RAW_PER_ENCODED.1 * RAW_PER_ENCODED.0
}
