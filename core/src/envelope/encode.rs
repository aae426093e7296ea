//! envelope/encode.rs
//!
//! Envelope encoding.
//!
//! Layout, in this exact order:
//! - optional version entry: `0x01 ‖ len ‖ version`
//! - optional nonce entry:   `0x02 ‖ len ‖ nonce`
//! - terminal entry:         `0x00 ‖ payload` (no length byte)

use crate::constants::{tags, MAX_SIGNER_NONCE_LEN};
use crate::envelope::types::{EnvelopeError, KeyVersion};

/// Frame `payload` behind optional version and nonce entries.
///
/// An empty nonce is treated as absent so unsalted signatures stay
/// byte-identical to the ones older deployments produce.
pub fn encode_envelope(
    version: Option<&KeyVersion>,
    nonce: Option<&[u8]>,
    payload: &[u8],
) -> Result<Vec<u8>, EnvelopeError> {
    let version_bytes = version.map(KeyVersion::to_wire).transpose()?;
    let nonce = nonce.filter(|n| !n.is_empty());
    if let Some(n) = nonce {
        if n.len() > MAX_SIGNER_NONCE_LEN {
            return Err(EnvelopeError::NonceTooLong { have: n.len(), max: MAX_SIGNER_NONCE_LEN });
        }
    }

    let capacity = version_bytes.as_ref().map_or(0, |v| 2 + v.len())
        + nonce.map_or(0, |n| 2 + n.len())
        + 1
        + payload.len();
    let mut out = Vec::with_capacity(capacity);

    if let Some(v) = &version_bytes {
        put_entry(&mut out, tags::VERSION, v);
    }
    if let Some(n) = nonce {
        put_entry(&mut out, tags::NONCE, n);
    }

    out.push(tags::TERMINAL);
    out.extend_from_slice(payload);

    debug_assert_eq!(out.len(), capacity, "envelope wrote incorrect length");
    Ok(out)
}

/// Write one length-prefixed entry. Callers check `value.len() <= 255`.
#[inline]
fn put_entry(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    out.push(tag);
    out.push(value.len() as u8);
    out.extend_from_slice(value);
}
