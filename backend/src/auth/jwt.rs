//! JWT token issuance and verification
//!
//! Tokens are HS256-signed claims carrying the user id and an expiry. Keys are
//! derived once from the configured secret and shared behind `Arc`s.

use crate::config::JwtConfig;
use anyhow::{anyhow, Result};
use blog_api_shared::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 365 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret)),
            decoding: Arc::new(DecodingKey::from_secret(secret)),
        }
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    token_expiry_secs: i64,
}

impl JwtService {
    /// Build the service from configuration
    ///
    /// Fails when no secret is configured, or when the expiry is not a
    /// positive number of seconds up to [`MAX_TOKEN_EXPIRY_SECS`].
    pub fn from_config(config: &JwtConfig) -> Result<Self> {
        let secret = config
            .secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("JWT signing secret is not configured (set BLOG__JWT__SECRET)"))?;

        if !(1..=MAX_TOKEN_EXPIRY_SECS).contains(&config.token_expiry_secs) {
            return Err(anyhow!(
                "JWT token expiry must be between 1 and {} seconds, got {}",
                MAX_TOKEN_EXPIRY_SECS,
                config.token_expiry_secs
            ));
        }

        Ok(Self::new(secret, config.token_expiry_secs))
    }

    /// Create a service from a raw secret. Call once at startup.
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced exactly; see `verify`.
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret.as_bytes()),
            validation: Arc::new(validation),
            token_expiry_secs,
        }
    }

    /// Issue a token for `user_id`, valid for the configured expiry
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let exp = Duration::try_seconds(self.token_expiry_secs)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| anyhow!("Token expiry of {}s is out of range", self.token_expiry_secs))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow!("Failed to sign token: {}", e))
    }

    /// Verify a token and return the user id it was issued for
    ///
    /// Every failure collapses into [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let claims = decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?
            .claims;

        // jsonwebtoken accepts exp == now; a token is only valid strictly before it.
        if Utc::now().timestamp() >= claims.exp {
            return Err(AuthError::InvalidToken);
        }

        claims
            .sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 1)
            .ok_or(AuthError::InvalidToken)
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn token_expiry_secs(&self) -> i64 {
        self.token_expiry_secs
    }
}
