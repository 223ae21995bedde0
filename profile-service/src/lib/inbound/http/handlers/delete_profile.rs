use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

pub async fn delete_profile<S: UserServicePort>(
    State(state): State<AppState<S>>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<StatusCode, ApiError> {
    state
        .user_service
        .delete_profile(&caller.user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
