//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
///
/// Fails only if the OS entropy source fails.
pub fn random_bytes(len: usize) -> Result<Vec<u8>, rand::Error> {
    let mut bytes = vec![0u8; len];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Random opaque token: `len` random bytes, URL-safe Base64 (padded)
pub fn random_token(len: usize) -> Result<String, rand::Error> {
    random_bytes(len).map(|bytes| to_base64_url(&bytes))
}

/// Encode bytes as standard Base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard Base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as URL-safe Base64
pub fn to_base64_url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE.encode(bytes)
}

/// Constant-time comparison to prevent timing attacks
///
/// Runtime depends only on the length of the inputs, never on the
/// position of the first differing byte.
#[inline(never)]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    std::hint::black_box(result) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32).unwrap();
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_random_token_is_url_safe_and_unique() {
        let a = random_token(64).unwrap();
        let b = random_token(64).unwrap();
        assert_ne!(a, b);
        // 64 bytes -> 88 chars of padded base64
        assert_eq!(a.len(), 88);
        assert!(!a.contains('+') && !a.contains('/'));
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        let decoded = from_base64(&to_base64(data)).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_constant_time_eq() {
        let a = [1u8, 2, 3, 4];
        let b = [1u8, 2, 3, 4];
        let c = [1u8, 2, 3, 5];
        assert!(constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &c));
        assert!(!constant_time_eq(&a, &a[..3]));
        assert!(constant_time_eq(&[], &[]));
    }
}
