//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Byte length of tokens produced by [`random_token`]
pub const TOKEN_BYTES: usize = 32;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate an opaque, URL-safe random token
///
/// 256 bits from the OS CSPRNG, encoded as unpadded URL-safe base64
/// (43 characters), so the value can travel in a JSON body or a query string.
pub fn random_token() -> String {
    to_base64_url(&random_bytes(TOKEN_BYTES))
}

/// Encode bytes as unpadded URL-safe base64
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
