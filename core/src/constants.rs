/// TLV tag identifiers for the envelope wire format.
///
/// Every entry except the terminal one is `tag(1) ‖ len(1) ‖ value(len)`.
/// The terminal entry has no length byte and consumes the rest of the buffer.
pub mod tags {
    pub const TERMINAL: u8 = 0x00;
    pub const VERSION: u8  = 0x01;
    pub const NONCE: u8    = 0x02;
}

/// Width of a numeric key version on the wire (u64 little-endian).
pub const NUMBER_VERSION_LEN: usize = 8;

/// Longest label version that fits behind a one-byte length.
pub const MAX_LABEL_VERSION_LEN: usize = u8::MAX as usize;

/// Longest nonce the signer can frame behind a one-byte length.
pub const MAX_SIGNER_NONCE_LEN: usize = u8::MAX as usize;

/// CSRF defaults.
pub mod csrf {
    /// Nonce size used when the caller does not pick one.
    pub const DEFAULT_NONCE_SIZE: u8 = 16;

    pub const DEFAULT_COOKIE_NAME: &str = "__Host-csrf";
    pub const DEFAULT_HEADER_NAME: &str = "X-Csrf-Token";
    pub const DEFAULT_FORM_NAME: &str   = "csrf_token";

    /// Methods that mutate state and therefore carry a CSRF token.
    pub const GUARDED_METHODS: &[&str] = &["DELETE", "PATCH", "POST", "PUT"];
}
