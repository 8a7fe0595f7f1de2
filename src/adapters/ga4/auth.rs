//! Bearer token acquisition
//!
//! Two sources are supported: a pre-issued access token, or a service-account
//! key file exchanged for a token with the OAuth 2.0 JWT bearer grant. Tokens
//! from the grant are cached until shortly before they expire.

use super::models::ApiErrorBody;
use crate::config::{expose_owned, secret_string, CredentialsConfig, SecretString};
use crate::domain::{Ga4Error, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Fields of a service-account key file used for the grant
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: SecretString,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    /// Reads and parses a key file
    ///
    /// # Errors
    ///
    /// Returns [`Ga4Error::Authentication`] if the file is missing, unreadable
    /// or not a service-account key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Ga4Error::Authentication(format!(
                "Cannot read credentials file {}: {e}",
                path.display()
            ))
        })?;

        let key: ServiceAccountKey = serde_json::from_str(&contents).map_err(|e| {
            Ga4Error::Authentication(format!(
                "Credentials file {} is not a valid service-account key: {e}",
                path.display()
            ))
        })?;

        if key.client_email.trim().is_empty() {
            return Err(Ga4Error::Authentication(format!(
                "Credentials file {} has an empty client_email",
                path.display()
            )));
        }

        Ok(key)
    }
}

#[derive(Debug, Serialize)]
struct GrantClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

struct CachedToken {
    token: SecretString,
    expires_at: DateTime<Utc>,
}

/// Service-account JWT bearer grant with token caching
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    scope: String,
    client: Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountAuth {
    /// # Errors
    ///
    /// Returns [`Ga4Error::Authentication`] if the private key is not a valid
    /// RSA PEM key.
    pub fn new(key: ServiceAccountKey, scope: impl Into<String>, client: Client) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.expose_secret().as_bytes())
            .map_err(|e| {
                Ga4Error::Authentication(format!(
                    "Invalid private key for {}: {e}",
                    key.client_email
                ))
            })?;

        Ok(Self {
            key,
            encoding_key,
            scope: scope.into(),
            client,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(entry) = cached.as_ref() {
            if entry.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > Utc::now() {
                return Ok(expose_owned(&entry.token));
            }
        }

        let fresh = self.request_token().await?;
        let token = expose_owned(&fresh.token);
        *cached = Some(fresh);
        Ok(token)
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = GrantClaims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| Ga4Error::Authentication(format!("Failed to sign token assertion: {e}")))
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;

        tracing::debug!(
            client_email = %self.key.client_email,
            token_uri = %self.key.token_uri,
            "Requesting access token"
        );

        let resp = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| {
                Ga4Error::UpstreamUnavailable(format!("Token endpoint unreachable: {e}"))
            })?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if status.is_server_error() || status.as_u16() == 429 {
            return Err(Ga4Error::UpstreamUnavailable(format!(
                "Token endpoint returned {status}: {}",
                ApiErrorBody::message_from(&body)
            )));
        }

        if !status.is_success() {
            let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {description}", err.error),
                    None => err.error,
                },
                Err(_) => body.trim().to_string(),
            };
            return Err(Ga4Error::Authentication(format!(
                "Token request rejected with {status}: {reason}"
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            Ga4Error::Authentication(format!("Malformed token endpoint response: {e}"))
        })?;

        let lifetime = parsed.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        Ok(CachedToken {
            token: secret_string(parsed.access_token),
            expires_at: now + Duration::seconds(lifetime),
        })
    }
}

/// Where bearer tokens come from
pub enum TokenSource {
    /// Pre-issued token, sent as is
    Static(SecretString),
    /// Service-account grant
    ServiceAccount(Box<ServiceAccountAuth>),
}

impl TokenSource {
    /// Builds the token source described by the credentials section
    ///
    /// The key file is read here, so a missing or malformed file fails before
    /// any report request is made.
    pub fn from_config(credentials: &CredentialsConfig, client: Client) -> Result<Self> {
        match (&credentials.access_token, &credentials.key_file) {
            (Some(token), _) => Ok(TokenSource::Static(token.clone())),
            (None, Some(path)) => {
                let key = ServiceAccountKey::from_file(path)?;
                let auth = ServiceAccountAuth::new(key, credentials.scope.clone(), client)?;
                tracing::debug!(
                    client_email = %auth.client_email(),
                    "Using service-account credentials"
                );
                Ok(TokenSource::ServiceAccount(Box::new(auth)))
            }
            (None, None) => Err(Ga4Error::Authentication(
                "No credentials configured".to_string(),
            )),
        }
    }

    /// Returns a bearer token, refreshing it if needed
    pub async fn bearer(&self) -> Result<String> {
        match self {
            TokenSource::Static(token) => Ok(expose_owned(token)),
            TokenSource::ServiceAccount(auth) => auth.access_token().await,
        }
    }
}
