//! envelope/types.rs
//! Tags, key versions and the borrowed envelope view.
//!
//! Wire notes:
//! - Entries are `tag(1) ‖ len(1) ‖ value(len)` except the terminal entry,
//!   which is `0x00 ‖ value(remaining)` and always comes last.
//! - At most one version entry and one nonce entry per envelope.
//! - Label versions are raw UTF-8; number versions are u64 little-endian.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use num_enum::TryFromPrimitive;

use crate::constants::{tags, MAX_LABEL_VERSION_LEN, NUMBER_VERSION_LEN};
use crate::utils::enum_name_or_hex;

/// TLV tag registry.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum Tag {
    Terminal = tags::TERMINAL,
    Version  = tags::VERSION,
    Nonce    = tags::NONCE,
}

/// How a key source spells its versions on the wire.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VersionKind {
    /// Opaque string label, 1-byte length + UTF-8.
    #[default]
    Label,
    /// Monotonic integer, always 8 bytes little-endian.
    Number,
}

/// Identifier of the key that produced an envelope.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyVersion {
    Label(String),
    Number(u64),
}

impl KeyVersion {
    pub fn kind(&self) -> VersionKind {
        match self {
            KeyVersion::Label(_) => VersionKind::Label,
            KeyVersion::Number(_) => VersionKind::Number,
        }
    }

    /// Value bytes of the version entry (without tag and length).
    pub fn to_wire(&self) -> Result<Vec<u8>, EnvelopeError> {
        match self {
            KeyVersion::Label(label) => {
                if label.len() > MAX_LABEL_VERSION_LEN {
                    return Err(EnvelopeError::VersionTooLong {
                        have: label.len(),
                        max: MAX_LABEL_VERSION_LEN,
                    });
                }
                Ok(label.as_bytes().to_vec())
            }
            KeyVersion::Number(n) => Ok(n.to_le_bytes().to_vec()),
        }
    }

    /// Parse the value bytes of a version entry.
    pub fn from_wire(kind: VersionKind, value: &[u8]) -> Result<Self, EnvelopeError> {
        match kind {
            VersionKind::Label => std::str::from_utf8(value)
                .map(|s| KeyVersion::Label(s.to_owned()))
                .map_err(|_| EnvelopeError::InvalidVersion("label is not UTF-8".into())),
            VersionKind::Number => {
                if value.len() != NUMBER_VERSION_LEN {
                    return Err(EnvelopeError::InvalidVersion(format!(
                        "number version must be {} bytes, got {}",
                        NUMBER_VERSION_LEN,
                        value.len()
                    )));
                }
                Ok(KeyVersion::Number(LittleEndian::read_u64(value)))
            }
        }
    }
}

impl fmt::Display for KeyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyVersion::Label(label) => f.write_str(label),
            KeyVersion::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for KeyVersion {
    fn from(label: &str) -> Self {
        KeyVersion::Label(label.to_owned())
    }
}

impl From<String> for KeyVersion {
    fn from(label: String) -> Self {
        KeyVersion::Label(label)
    }
}

impl From<u64> for KeyVersion {
    fn from(n: u64) -> Self {
        KeyVersion::Number(n)
    }
}

/// Parser settings that depend on the caller.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParseOptions {
    /// How to read the version entry.
    pub version_kind: VersionKind,
    /// Whether a nonce entry is legal (signer path only).
    pub allow_nonce: bool,
}

impl ParseOptions {
    pub fn codec(version_kind: VersionKind) -> Self {
        Self { version_kind, allow_nonce: false }
    }

    pub fn signer(version_kind: VersionKind) -> Self {
        Self { version_kind, allow_nonce: true }
    }
}

/// Borrowed view over a parsed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeView<'a> {
    pub version: Option<KeyVersion>,
    pub nonce: Option<&'a [u8]>,
    /// Terminal entry: ciphertext or MAC.
    pub payload: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    /// Input ended before the terminal entry.
    #[error("envelope ends before terminal entry")]
    MissingTerminal,

    /// Input ended inside a non-terminal entry's length byte.
    #[error("envelope truncated inside {} entry", enum_name_or_hex::<Tag>(*tag as u8))]
    Truncated { tag: Tag },

    /// Declared length runs past the end of the input.
    #[error("{} entry declares {declared} bytes but only {remaining} remain", enum_name_or_hex::<Tag>(*tag as u8))]
    LengthOutOfRange { tag: Tag, declared: usize, remaining: usize },

    /// Tag byte outside the registry, or a nonce on the codec path.
    #[error("unexpected tag: {}", enum_name_or_hex::<Tag>(*raw))]
    UnexpectedTag { raw: u8 },

    /// Second version or nonce entry.
    #[error("duplicate {} entry", enum_name_or_hex::<Tag>(*tag as u8))]
    DuplicateEntry { tag: Tag },

    /// Version entry present but unreadable.
    #[error("invalid version entry: {0}")]
    InvalidVersion(String),

    /// Label version does not fit behind a one-byte length.
    #[error("version label too long: {have} > {max}")]
    VersionTooLong { have: usize, max: usize },

    /// Nonce does not fit behind a one-byte length.
    #[error("nonce too long: {have} > {max}")]
    NonceTooLong { have: usize, max: usize },
}

impl EnvelopeError {
    /// True when the error comes from the caller's own inputs on the encode
    /// side rather than from parsing an untrusted envelope.
    pub fn is_encode_side(&self) -> bool {
        matches!(self, EnvelopeError::VersionTooLong { .. } | EnvelopeError::NonceTooLong { .. })
    }
}
