use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity-provider token claims (OIDC profile subset)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String, // Identity-provider subject (e.g. "auth0|abc123")
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Profile fields carried by a token, independent of its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProfile {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub picture: String,
}

/// JWT Service - verifies identity-provider tokens (HS256)
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: Option<String>,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String, audience: Option<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
        }
    }

    /// Mint a token the way the identity provider would.
    ///
    /// Used by tests and local tooling; production tokens come from the provider.
    pub fn create_token(&self, profile: &IdentityProfile, ttl: chrono::Duration) -> Result<String> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: profile.sub.clone(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            picture: profile.picture.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if the signature, issuer, audience (when configured) and
    /// expiry all check out
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }
}

impl Claims {
    pub fn profile(&self) -> IdentityProfile {
        IdentityProfile {
            sub: self.sub.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            picture: self.picture.clone(),
        }
    }
}
