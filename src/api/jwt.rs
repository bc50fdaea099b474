//! Bearer token verification
//!
//! Tokens are issued by the external identity provider and signed with the
//! shared HS256 secret. The `sub` claim is the owner id.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AuthConfig;
use crate::errors::{LeadlinkerError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub iss: Option<String>,
}

pub struct IdentityVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    pub fn new(secret: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer.filter(|i| !i.is_empty()) {
            validation.set_issuer(&[issuer]);
        }
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// `None` when no secret is configured (management API disabled)
    pub fn from_config(config: &AuthConfig) -> Option<Self> {
        let secret = config.jwt_secret.trim();
        if secret.is_empty() {
            return None;
        }
        Some(Self::new(secret, config.jwt_issuer.as_deref()))
    }

    pub fn verify(&self, token: &str) -> Result<IdentityClaims> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                LeadlinkerError::unauthenticated("Invalid or expired token")
            })?;

        if data.claims.sub.trim().is_empty() {
            return Err(LeadlinkerError::unauthenticated("Token has no subject"));
        }
        Ok(data.claims)
    }
}
