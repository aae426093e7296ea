//! envelope/decode.rs
//!
//! Envelope decoding.
//!
//! Design notes:
//! - Explicit state machine over a bounds-checked cursor:
//!   `ExpectTag -> ReadLength -> ReadValue -> ExpectTag ... -> Terminal`.
//! - `0x00` ends scanning unconditionally; everything after it is payload.
//! - Every read goes through `slice::get`, so hostile input can only produce
//!   an `EnvelopeError`, never a panic or an out-of-bounds read.

use crate::envelope::types::{EnvelopeError, EnvelopeView, KeyVersion, ParseOptions, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ExpectTag,
    ReadLength(Tag),
    ReadValue { tag: Tag, len: usize },
    Terminal,
}

/// Parse a TLV envelope into a borrowed view.
///
/// # Errors
/// - `MissingTerminal` if input ends before a `0x00` tag.
/// - `Truncated` if input ends on a length byte.
/// - `LengthOutOfRange` if a declared length exceeds the remaining bytes.
/// - `UnexpectedTag` for tags outside the registry, or a nonce when
///   `opts.allow_nonce` is false.
/// - `DuplicateEntry` for a second version or nonce entry.
/// - `InvalidVersion` if the version bytes do not match `opts.version_kind`.
pub fn decode_envelope(buf: &[u8], opts: ParseOptions) -> Result<EnvelopeView<'_>, EnvelopeError> {
    let mut pos = 0usize;
    let mut state = ParseState::ExpectTag;

    let mut version: Option<KeyVersion> = None;
    let mut nonce: Option<&[u8]> = None;

    loop {
        state = match state {
            ParseState::ExpectTag => {
                let raw = *buf.get(pos).ok_or(EnvelopeError::MissingTerminal)?;
                pos += 1;
                match Tag::try_from(raw) {
                    Ok(Tag::Terminal) => ParseState::Terminal,
                    Ok(Tag::Nonce) if !opts.allow_nonce => {
                        return Err(EnvelopeError::UnexpectedTag { raw });
                    }
                    Ok(tag) => ParseState::ReadLength(tag),
                    Err(_) => return Err(EnvelopeError::UnexpectedTag { raw }),
                }
            }

            ParseState::ReadLength(tag) => {
                let len = *buf.get(pos).ok_or(EnvelopeError::Truncated { tag })?;
                pos += 1;
                ParseState::ReadValue { tag, len: len as usize }
            }

            ParseState::ReadValue { tag, len } => {
                let remaining = buf.len() - pos;
                let value = buf
                    .get(pos..pos + len)
                    .ok_or(EnvelopeError::LengthOutOfRange { tag, declared: len, remaining })?;
                pos += len;

                match tag {
                    Tag::Version => {
                        if version.is_some() {
                            return Err(EnvelopeError::DuplicateEntry { tag });
                        }
                        version = Some(KeyVersion::from_wire(opts.version_kind, value)?);
                    }
                    Tag::Nonce => {
                        if nonce.is_some() {
                            return Err(EnvelopeError::DuplicateEntry { tag });
                        }
                        nonce = Some(value);
                    }
                    // ExpectTag never hands a terminal tag to ReadLength.
                    Tag::Terminal => return Err(EnvelopeError::UnexpectedTag { raw: tag as u8 }),
                }
                ParseState::ExpectTag
            }

            ParseState::Terminal => {
                return Ok(EnvelopeView {
                    version,
                    nonce,
                    payload: &buf[pos..],
                });
            }
        };
    }
}
