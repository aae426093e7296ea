pub mod types;
pub mod aead;
pub mod mac;
pub mod nonce;

pub use types::*;
pub use aead::*;
pub use mac::*;
pub use nonce::*;
