//! Cryptographic Utilities
//!
//! Signed opaque tokens: `"{payload}.{base64url(hmac_sha256(key, payload))}"`.
//! The payload is not secret, only tamper-evident.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Compute HMAC-SHA256 over `data`
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Append an HMAC signature to `payload`
pub fn sign_token(key: &[u8], payload: &str) -> String {
    let signature = hmac_sha256(key, payload.as_bytes());
    format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature))
}

/// Return the payload of a token whose signature checks out
///
/// The comparison is constant time (`Mac::verify_slice`).
pub fn verify_token<'a>(key: &[u8], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.rsplit_once('.')?;
    if payload.is_empty() {
        return None;
    }

    let signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_known_value() {
        // RFC 4231 test case 2
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        let expected =
            hex::decode("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
                .unwrap();
        assert_eq!(mac.to_vec(), expected);
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        assert!(bytes.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_sign_and_verify() {
        let key = b"server secret";
        let token = sign_token(key, "3f0c6f8e-session");
        assert_eq!(verify_token(key, &token), Some("3f0c6f8e-session"));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = sign_token(b"key-a", "payload");
        assert_eq!(verify_token(b"key-b", &token), None);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = sign_token(b"key", "payload");
        let forged = token.replacen("payload", "payloae", 1);
        assert_eq!(verify_token(b"key", &forged), None);
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let key = b"key";
        assert_eq!(verify_token(key, ""), None);
        assert_eq!(verify_token(key, "no-signature"), None);
        assert_eq!(verify_token(key, ".c2ln"), None);
        assert_eq!(verify_token(key, "payload.!!!not-base64"), None);
    }
}
