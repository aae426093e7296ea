//! key_source/decoder.rs
//! Turning string-valued secrets into key bytes.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretDecodeError {
    #[error("secret is not valid unpadded base64: {0}")]
    Base64(String),

    #[error("secret is not valid hex: {0}")]
    Hex(String),
}

/// Unpadded standard base64; non-zero trailing bits are accepted.
const LENIENT_STD_NO_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// Line breaks are skipped, as in secrets saved from a file.
fn decode_base64(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    LENIENT_STD_NO_PAD.decode(compact)
}

/// How a string secret becomes key bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretDecoder {
    /// Unpadded standard base64, then hex, then the raw UTF-8 bytes.
    #[default]
    Auto,
    Base64,
    Hex,
    Raw,
}

impl SecretDecoder {
    pub fn decode(self, value: &str) -> Result<Vec<u8>, SecretDecodeError> {
        match self {
            SecretDecoder::Auto => Ok(decode_base64(value)
                .or_else(|_| hex::decode(value))
                .unwrap_or_else(|_| value.as_bytes().to_vec())),
            SecretDecoder::Base64 => decode_base64(value)
                .map_err(|e| SecretDecodeError::Base64(e.to_string())),
            SecretDecoder::Hex => hex::decode(value).map_err(|e| SecretDecodeError::Hex(e.to_string())),
            SecretDecoder::Raw => Ok(value.as_bytes().to_vec()),
        }
    }
}

