use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity assertion carried by every issued token.
///
/// Only the registered claims the service relies on are modelled. Every
/// field is optional at the serde level so that a token with a missing claim
/// still decodes and can be rejected with a precise error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Claims {
    /// Subject (user identifier, decimal string for numeric ids)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a verified subject.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier
    /// * `issued_at` - Instant the token is minted
    /// * `lifetime` - How long the token stays valid
    ///
    /// # Returns
    /// Claims with sub, iat and `exp = issued_at + lifetime`, or `None` when
    /// the expiry falls outside the representable range
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Option<Self> {
        let expires_at = issued_at.checked_add_signed(lifetime)?;

        Some(Self {
            sub: Some(subject.to_string()),
            exp: Some(expires_at.timestamp()),
            iat: Some(issued_at.timestamp()),
        })
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// Expiry is exclusive: a token is already expired at its `exp` second.
    /// Claims without `exp` are treated as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| current_timestamp >= exp)
    }
}
