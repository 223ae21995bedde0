use std::sync::Arc;

use auth::AuthenticationError;
use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that admits requests carrying a valid bearer token.
///
/// Every rejection answers with the same 401 body; the specific reason is
/// only logged.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = match req.headers().get(http::header::AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| reject(AuthenticationError::MalformedCredential))?,
        ),
        None => None,
    };

    let user_id: UserId = authenticator
        .authorize(authorization, Utc::now())
        .map_err(reject)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn reject(reason: AuthenticationError) -> ApiError {
    tracing::warn!(reason = %reason, "Rejected unauthenticated request");
    ApiError::unauthorized()
}
