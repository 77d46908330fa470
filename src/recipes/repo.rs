use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::recipes::dto::RecipePayload;

/// Recipe record in the database. `owner_id` is set once at creation and
/// never changed by an update; `date` is re-stamped on every write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub date: OffsetDateTime,
}

const COLUMNS: &str = "id, owner_id, name, category, description, ingredients, directions, date";

impl Recipe {
    pub async fn insert(
        db: &PgPool,
        owner_id: i64,
        content: &RecipePayload,
        date: OffsetDateTime,
    ) -> anyhow::Result<Recipe> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (owner_id, name, category, description, ingredients, directions, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, owner_id, name, category, description, ingredients, directions, date
            "#,
        )
        .bind(owner_id)
        .bind(&content.name)
        .bind(&content.category)
        .bind(&content.description)
        .bind(&content.ingredients)
        .bind(&content.directions)
        .bind(date)
        .fetch_one(db)
        .await?;
        Ok(recipe)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(recipe)
    }

    /// Overwrite all client-mutable fields under the same id. The owner
    /// column is deliberately untouched.
    pub async fn update_content(
        db: &PgPool,
        id: i64,
        content: &RecipePayload,
        date: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE recipes
            SET name = $2, category = $3, description = $4,
                ingredients = $5, directions = $6, date = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&content.name)
        .bind(&content.category)
        .bind(&content.description)
        .bind(&content.ingredients)
        .bind(&content.directions)
        .bind(date)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn delete_by_id(db: &PgPool, id: i64) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete_all(db: &PgPool) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM recipes").execute(db).await?;
        Ok(())
    }

    /// Exact category match, ignoring case. Rows come back in stable
    /// store order; the service layer applies the final ordering.
    pub async fn find_all_by_category_ignore_case(
        db: &PgPool,
        category: &str,
    ) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {COLUMNS} FROM recipes WHERE LOWER(category) = LOWER($1) ORDER BY id"
        ))
        .bind(category)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Name substring match, ignoring case.
    pub async fn find_all_by_name_containing(
        db: &PgPool,
        fragment: &str,
    ) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {COLUMNS} FROM recipes WHERE name ILIKE '%' || $1 || '%' ORDER BY id"
        ))
        .bind(fragment)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
