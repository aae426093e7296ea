//! envelope/mod.rs
//! Self-describing TLV frame around ciphertexts and MACs.
//!
//! Notes:
//! - The version entry tells the decoder which key to ask for, so tokens
//!   survive key rotation.
//! - Version and nonce travel in clear and are not bound into the AEAD tag.
//!   A spliced version prefix makes decryption run under a different key and
//!   fail authentication, but it is not itself detected as tampering.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
