//! encoding.rs
//! String transport for envelope bytes (cookies, headers, query strings).

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::types::TokenError;

/// Text form of a token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEncoding {
    /// URL-safe alphabet, no padding. Safe in cookies and query strings.
    #[default]
    Base64UrlNoPad,
    /// Standard alphabet, no padding.
    Base64StdNoPad,
    /// Lowercase hex.
    Hex,
}

impl TokenEncoding {
    pub fn encode_to_string(self, bytes: &[u8]) -> String {
        match self {
            TokenEncoding::Base64UrlNoPad => URL_SAFE_NO_PAD.encode(bytes),
            TokenEncoding::Base64StdNoPad => STANDARD_NO_PAD.encode(bytes),
            TokenEncoding::Hex => hex::encode(bytes),
        }
    }

    pub fn decode_string(self, token: &str) -> Result<Vec<u8>, TokenError> {
        let decoded = match self {
            TokenEncoding::Base64UrlNoPad => URL_SAFE_NO_PAD.decode(token).map_err(|e| e.to_string()),
            TokenEncoding::Base64StdNoPad => STANDARD_NO_PAD.decode(token).map_err(|e| e.to_string()),
            TokenEncoding::Hex => hex::decode(token).map_err(|e| e.to_string()),
        };
        decoded.map_err(|e| TokenError::Encoding(format!("{:?}: {}", self, e)))
    }
}
