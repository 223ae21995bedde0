use std::fmt::Display;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::errors::JwtError;

/// Token lifetime used unless [`JwtHandler::with_lifetime`] overrides it.
pub const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// JWT token handler: issues and verifies identity assertions.
///
/// Uses HS256 (HMAC with SHA-256) with a secret fixed at construction.
/// Verification is a pure function of the token, the secret and the
/// instant passed in; no server-side session state is kept.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
    has_secret: bool,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every token issued before
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
            has_secret: !secret.is_empty(),
        }
    }

    /// Override the lifetime of issued tokens.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Mint a token for `subject`, valid from `now` until `now + lifetime`.
    ///
    /// # Errors
    /// * `SigningFailed` - Secret is empty, the expiry overflows, or encoding failed
    pub fn issue(&self, subject: impl Display, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, now, self.lifetime).ok_or_else(|| {
            JwtError::SigningFailed(format!(
                "token lifetime of {} hours overflows the expiry",
                self.lifetime.num_hours()
            ))
        })?;
        self.encode(&claims)
    }

    /// Encode arbitrary claims into a signed token.
    ///
    /// # Errors
    /// * `SigningFailed` - Secret is empty or encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        if !self.has_secret {
            return Err(JwtError::SigningFailed(
                "signing secret is empty".to_string(),
            ));
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token at instant `now` and return its subject parsed as `S`.
    ///
    /// Checks run in order: structure, signature, expiry, subject. The
    /// first failing check decides the error.
    ///
    /// # Errors
    /// * `MalformedToken` - Token is not a well-formed JWT
    /// * `InvalidSignature` - Signature or algorithm does not match the secret
    /// * `Expired` - `now` is at or past `exp`
    /// * `MalformedClaims` - Claims undecodable, `exp`/`sub` missing, or `sub` not an `S`
    pub fn verify<S>(&self, token: &str, now: DateTime<Utc>) -> Result<S, JwtError>
    where
        S: FromStr,
        S::Err: Display,
    {
        decode_header(token).map_err(|e| JwtError::MalformedToken(e.to_string()))?;

        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    JwtError::InvalidSignature
                }
                ErrorKind::Json(_) => JwtError::MalformedClaims(e.to_string()),
                _ => JwtError::MalformedToken(e.to_string()),
            })?;

        if claims.exp.is_none() {
            return Err(JwtError::MalformedClaims("missing exp claim".to_string()));
        }
        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::Expired);
        }

        let subject = claims
            .sub
            .ok_or_else(|| JwtError::MalformedClaims("missing sub claim".to_string()))?;

        subject
            .parse::<S>()
            .map_err(|e| JwtError::MalformedClaims(format!("invalid sub claim: {}", e)))
    }
}
