use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    auth::password::hash_password,
    config::AdminBootstrap,
    error::ApiError,
    users::repo::{Role, User},
};

/// Register a new account. The unique-email invariant is checked against
/// the store first; new accounts always get exactly the USER role.
pub async fn register(db: &PgPool, email: &str, password: &str) -> Result<User, ApiError> {
    if User::find_by_email(db, email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::EmailTaken);
    }
    let hash = hash_password(password)?;
    let user = User::create(db, email, &hash, &[Role::User]).await?;
    Ok(user)
}

/// Resolve an authenticated principal's email to a full user record.
/// A missing row means the identity behind the token no longer exists,
/// which is an authentication failure rather than a 404.
pub async fn resolve_principal(db: &PgPool, email: &str) -> Result<User, ApiError> {
    match User::find_by_email(db, email).await? {
        Some(user) => Ok(user),
        None => {
            warn!(%email, "principal has no user record");
            Err(ApiError::AuthFailure)
        }
    }
}

/// Actor must hold the ADMIN role.
pub fn require_admin(actor: &User) -> Result<(), ApiError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Remove a user and, in the same transaction, every recipe it owns.
pub async fn delete_user(db: &PgPool, id: i64) -> Result<(), ApiError> {
    if !User::delete_with_recipes(db, id).await? {
        return Err(ApiError::NotFound);
    }
    info!(user_id = %id, "user deleted");
    Ok(())
}

/// Create the configured admin account at startup if it does not exist.
pub async fn ensure_admin(db: &PgPool, bootstrap: &AdminBootstrap) -> anyhow::Result<()> {
    if User::find_by_email(db, &bootstrap.email).await?.is_some() {
        return Ok(());
    }
    let hash = hash_password(&bootstrap.password)?;
    let user = User::create(db, &bootstrap.email, &hash, &[Role::User, Role::Admin]).await?;
    info!(user_id = %user.id, email = %user.email, "bootstrap admin created");
    Ok(())
}
