//! URL-safe base64 (`-` and `_`, no `=` padding) for compressed payloads.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

/// Emits unpadded text; accepts text with or without trailing `=`.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn to_text(data: &[u8]) -> String {
    URL_SAFE.encode(data)
}

pub fn from_text(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE.decode(text)
}
