use crate::authenticator::AuthenticationError;

const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from an `Authorization` header value.
///
/// Accepts exactly `Bearer <token>`: the scheme is case-sensitive, a single
/// space separates it from the token, and the token itself contains no
/// whitespace.
///
/// # Errors
/// * `MissingCredential` - Header absent or empty
/// * `MalformedCredential` - Any other shape
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, AuthenticationError> {
    let value = match authorization {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthenticationError::MissingCredential),
    };

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthenticationError::MalformedCredential)?;

    if scheme != BEARER_SCHEME || token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthenticationError::MalformedCredential);
    }

    Ok(token)
}
