use std::fmt::Display;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::bearer::extract_bearer;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::DUMMY_HASH;

/// Authentication coordinator combining password verification and JWT handling.
///
/// Constructed once per process with the signing secret and shared
/// read-only between requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Malformed bearer credential")]
    MalformedCredential,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator issuing tokens with the default lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
        }
    }

    /// Override the lifetime of issued tokens.
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.jwt_handler = self.jwt_handler.with_lifetime(lifetime);
        self
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against the stored hash of the claimed identity.
    ///
    /// `stored_hash` is `None` when the identity is unknown. The password is
    /// then checked against a dummy hash so both failure paths cost the same
    /// and end in the same error.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identity or password mismatch
    /// * `PasswordError` - Stored hash is malformed
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<(), AuthenticationError> {
        let matched = self
            .password_hasher
            .verify(password, stored_hash.unwrap_or(DUMMY_HASH))?;

        if stored_hash.is_none() || !matched {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(())
    }

    /// Mint a token for an already verified subject.
    ///
    /// # Errors
    /// * `JwtError::SigningFailed` - Token generation failed
    pub fn issue_token(
        &self,
        subject: impl Display,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, now)
    }

    /// Validate a bare token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Token validation or decoding failed
    pub fn validate_token<S>(&self, token: &str, now: DateTime<Utc>) -> Result<S, JwtError>
    where
        S: FromStr,
        S::Err: Display,
    {
        self.jwt_handler.verify(token, now)
    }

    /// Per-request gate: admit or reject an `Authorization` header value.
    ///
    /// # Errors
    /// * `MissingCredential` - No header
    /// * `MalformedCredential` - Header is not `Bearer <token>` or the token does not parse
    /// * `JwtError` - Invalid signature, expired, or malformed claims
    pub fn authorize<S>(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<S, AuthenticationError>
    where
        S: FromStr,
        S::Err: Display,
    {
        let token = extract_bearer(authorization)?;

        self.validate_token(token, now).map_err(|e| match e {
            JwtError::MalformedToken(_) => AuthenticationError::MalformedCredential,
            other => AuthenticationError::JwtError(other),
        })
    }
}
