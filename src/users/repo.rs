use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Granted role, stored as its wire name in the `roles` text array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Find a user by email. Exact, case-sensitive match.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, roles, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password and the given role set.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        roles: &[Role],
    ) -> anyhow::Result<User> {
        let role_names: Vec<String> = roles.iter().map(|r| r.as_str().to_string()).collect();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, roles)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, roles, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(&role_names)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Delete a user and every recipe it owns in one transaction.
    /// Returns false when no such user exists (nothing is removed).
    pub async fn delete_with_recipes(db: &PgPool, id: i64) -> anyhow::Result<bool> {
        let mut tx = db.begin().await?;
        sqlx::query("DELETE FROM recipes WHERE owner_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> User {
        User {
            id: 1,
            email: "cook@example.com".into(),
            password_hash: "hash".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn role_membership() {
        let user = user_with_roles(&["USER"]);
        assert!(user.has_role(Role::User));
        assert!(!user.is_admin());

        let admin = user_with_roles(&["USER", "ADMIN"]);
        assert!(admin.has_role(Role::User));
        assert!(admin.is_admin());
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = user_with_roles(&["USER"]);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("hash"));
    }
}
