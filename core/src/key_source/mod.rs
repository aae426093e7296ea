//! key_source/mod.rs
//! Key resolution and rotation.

pub mod types;
pub mod decoder;
pub mod static_key;
pub mod secret_store;
pub mod parameter_store;

pub use types::*;
pub use decoder::*;
pub use static_key::*;
pub use secret_store::*;
pub use parameter_store::*;
