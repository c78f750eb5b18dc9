//! Override token verification for blocked outcomes.
//!
//! A blocked outcome exposes a challenge (its decision id). An operator
//! releases it with either the HMAC-SHA256 of the challenge under the
//! configured secret, hex encoded, or one of the configured static codes.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Holds the override secret and static codes. Immutable after startup.
#[derive(Clone, Default)]
pub struct OverrideAuthority {
    secret: Option<SecretString>,
    codes: Vec<SecretString>,
}

impl std::fmt::Debug for OverrideAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideAuthority")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("codes", &self.codes.len())
            .finish()
    }
}

impl OverrideAuthority {
    /// An authority that accepts no token at all.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Creates an authority signing challenges with `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Some(SecretString::new(secret.into())),
            codes: Vec::new(),
        }
    }

    /// Adds static override codes.
    pub fn with_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes.extend(
            codes
                .into_iter()
                .map(Into::into)
                .filter(|code| !code.is_empty())
                .map(SecretString::new),
        );
        self
    }

    /// Builds an authority from already-wrapped secrets.
    pub fn from_secrets(secret: Option<SecretString>, codes: Vec<SecretString>) -> Self {
        Self {
            secret: secret.filter(|s| !s.expose_secret().is_empty()),
            codes: codes
                .into_iter()
                .filter(|c| !c.expose_secret().is_empty())
                .collect(),
        }
    }

    /// Returns true if any token could ever be accepted.
    pub fn is_enabled(&self) -> bool {
        self.secret.is_some() || !self.codes.is_empty()
    }

    /// The token an operator holding the secret presents for `challenge`.
    pub fn issue_token(&self, challenge: &str) -> Option<String> {
        let secret = self.secret.as_ref()?;
        sign(secret, challenge).map(hex::encode)
    }

    /// Verifies a token against the challenge in constant time.
    pub fn verify(&self, challenge: &str, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() {
            return false;
        }

        let signed = match (&self.secret, hex::decode(token)) {
            (Some(secret), Ok(provided)) => sign(secret, challenge)
                .map(|expected| constant_time_eq(&expected, &provided))
                .unwrap_or(false),
            _ => false,
        };

        // Check every code so timing does not reveal which one matched.
        let coded = self.codes.iter().fold(false, |matched, code| {
            matched | constant_time_eq(code.expose_secret().as_bytes(), token.as_bytes())
        });

        signed || coded
    }
}

fn sign(secret: &SecretString, challenge: &str) -> Option<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()).ok()?;
    mac.update(challenge.as_bytes());
    Some(mac.finalize().into_bytes().to_vec())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
