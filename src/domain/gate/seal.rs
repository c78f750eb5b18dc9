//! Seal key for outcome fingerprints.
//!
//! Only the pipeline that computed an outcome can seal it: fingerprints are
//! HMAC-SHA256 over the canonical content under a key the gate holds. The
//! key never leaves the crate, so an outcome assembled elsewhere cannot
//! carry a verifiable fingerprint.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Key used to seal and verify outcome fingerprints.
#[derive(Clone)]
pub struct SealKey {
    secret: SecretString,
}

impl std::fmt::Debug for SealKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SealKey([REDACTED])")
    }
}

impl Default for SealKey {
    fn default() -> Self {
        Self::generate()
    }
}

impl SealKey {
    /// A fresh random key, valid for the lifetime of the process.
    pub fn generate() -> Self {
        let bytes: Vec<u8> = Uuid::new_v4()
            .as_bytes()
            .iter()
            .chain(Uuid::new_v4().as_bytes())
            .copied()
            .collect();
        Self {
            secret: SecretString::new(hex::encode(bytes)),
        }
    }

    /// A key shared between processes that verify each other's outcomes.
    ///
    /// Returns `None` for an empty secret.
    pub fn from_secret(secret: SecretString) -> Option<Self> {
        if secret.expose_secret().is_empty() {
            return None;
        }
        Some(Self { secret })
    }

    pub(crate) fn sign(&self, content: &[u8]) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes()).ok()?;
        mac.update(content);
        Some(mac.finalize().into_bytes().to_vec())
    }

    pub(crate) fn verify(&self, content: &[u8], signature: &[u8]) -> bool {
        match self.sign(content) {
            Some(expected) if expected.len() == signature.len() => {
                expected.ct_eq(signature).into()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_verifies_under_same_key() {
        let key = SealKey::generate();
        let signature = key.sign(b"ranking").unwrap();
        assert_eq!(signature.len(), 32);
        assert!(key.verify(b"ranking", &signature));
        assert!(!key.verify(b"ranking!", &signature));
    }

    #[test]
    fn generated_keys_differ() {
        let signature = SealKey::generate().sign(b"ranking").unwrap();
        assert!(!SealKey::generate().verify(b"ranking", &signature));
    }

    #[test]
    fn shared_secret_keys_agree() {
        let a = SealKey::from_secret(SecretString::new("shared".to_string())).unwrap();
        let b = SealKey::from_secret(SecretString::new("shared".to_string())).unwrap();
        assert!(b.verify(b"ranking", &a.sign(b"ranking").unwrap()));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(SealKey::from_secret(SecretString::new(String::new())).is_none());
    }

    #[test]
    fn debug_output_redacts_key() {
        assert_eq!(format!("{:?}", SealKey::generate()), "SealKey([REDACTED])");
    }
}
