use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
    Router,
};
use tracing::instrument;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState, users::service};

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/users/:id", delete(delete_user))
}

/// Admin-only: remove a user and all recipes it owns.
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let actor = service::resolve_principal(&state.db, &email).await?;
    service::require_admin(&actor)?;
    service::delete_user(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
