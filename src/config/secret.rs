//! Access tokens and key material
//!
//! Values live in `secrecy::Secret`, so they are zeroed on drop, redacted in
//! `Debug`, and only readable through `expose_secret()`.
//!
//! ```rust
//! use ga4_export::config::{expose_owned, secret_string};
//!
//! let token = secret_string("ya29.token".to_string());
//! assert_eq!(expose_owned(&token), "ya29.token");
//! assert!(!format!("{token:?}").contains("ya29"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// String payload of a [`SecretString`]
#[derive(Clone, Debug, Zeroize, Serialize, Deserialize)]
#[serde(transparent)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// True for empty or whitespace-only values
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

pub type SecretString = Secret<SecretValue>;

#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Copies the secret out, for headers and request bodies
pub fn expose_owned(secret: &SecretString) -> String {
    secret.expose_secret().as_ref().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_round_trip() {
        let secret = secret_string("test-token".to_string());
        assert_eq!(expose_owned(&secret), "test-token");
        assert!(!secret.expose_secret().is_blank());
        assert!(secret_string("  ".to_string()).expose_secret().is_blank());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_secret_deserialize_from_toml() {
        #[derive(Deserialize)]
        struct Credentials {
            access_token: SecretString,
        }

        let creds: Credentials = toml::from_str("access_token = \"abc123\"").unwrap();
        assert_eq!(expose_owned(&creds.access_token), "abc123");
    }
}
