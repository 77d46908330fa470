use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

use crate::{
    error::ApiError,
    recipes::{dto::RecipePayload, repo::Recipe},
    users::repo::User,
};

/// Pure ownership gate for single-recipe mutation: allowed iff the actor
/// created the recipe. Admins get no override here; their privilege is
/// the separate bulk-delete capability.
pub fn authorize_mutation(actor: &User, recipe: &Recipe) -> Result<(), ApiError> {
    if recipe.owner_id == actor.id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Newest first, stable so that equal timestamps keep store order.
pub fn sort_newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.date.cmp(&a.date));
}

pub async fn create(db: &PgPool, content: &RecipePayload, owner: &User) -> Result<Recipe, ApiError> {
    let recipe = Recipe::insert(db, owner.id, content, OffsetDateTime::now_utc()).await?;
    info!(recipe_id = %recipe.id, owner_id = %owner.id, "recipe created");
    Ok(recipe)
}

pub async fn fetch(db: &PgPool, id: i64) -> Result<Recipe, ApiError> {
    Recipe::find_by_id(db, id).await?.ok_or(ApiError::NotFound)
}

/// Fetch, authorize, then overwrite content under the same id with a
/// fresh timestamp. The stored owner is preserved regardless of what the
/// client sent.
pub async fn update(
    db: &PgPool,
    id: i64,
    content: &RecipePayload,
    actor: &User,
) -> Result<(), ApiError> {
    let existing = fetch(db, id).await?;
    authorize_mutation(actor, &existing)?;
    Recipe::update_content(db, id, content, OffsetDateTime::now_utc()).await?;
    info!(recipe_id = %id, owner_id = %actor.id, "recipe updated");
    Ok(())
}

pub async fn delete(db: &PgPool, id: i64, actor: &User) -> Result<(), ApiError> {
    let existing = fetch(db, id).await?;
    authorize_mutation(actor, &existing)?;
    Recipe::delete_by_id(db, id).await?;
    info!(recipe_id = %id, owner_id = %actor.id, "recipe deleted");
    Ok(())
}

/// Unconditional bulk removal. The caller has already been authorized as
/// an administrator; user records are left untouched.
pub async fn delete_all(db: &PgPool) -> Result<(), ApiError> {
    Recipe::delete_all(db).await?;
    info!("all recipes deleted");
    Ok(())
}

pub async fn search_by_category(db: &PgPool, category: &str) -> Result<Vec<Recipe>, ApiError> {
    let mut recipes = Recipe::find_all_by_category_ignore_case(db, category).await?;
    sort_newest_first(&mut recipes);
    Ok(recipes)
}

pub async fn search_by_name(db: &PgPool, fragment: &str) -> Result<Vec<Recipe>, ApiError> {
    let mut recipes = Recipe::find_all_by_name_containing(db, fragment).await?;
    sort_newest_first(&mut recipes);
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::Role;
    use time::Duration;

    fn user(id: i64, roles: &[Role]) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            password_hash: "hash".into(),
            roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn recipe(id: i64, owner_id: i64, name: &str, seconds: i64) -> Recipe {
        Recipe {
            id,
            owner_id,
            name: name.into(),
            category: "dessert".into(),
            description: "sweet".into(),
            ingredients: vec!["sugar".into()],
            directions: vec!["mix".into()],
            date: OffsetDateTime::UNIX_EPOCH + Duration::seconds(seconds),
        }
    }

    #[test]
    fn owner_may_mutate() {
        let owner = user(1, &[Role::User]);
        let r = recipe(10, 1, "Pie", 0);
        assert!(authorize_mutation(&owner, &r).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let other = user(2, &[Role::User]);
        let r = recipe(10, 1, "Pie", 0);
        assert!(matches!(
            authorize_mutation(&other, &r),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn admin_gets_no_override() {
        // Bulk delete is the admin capability; per-record mutation stays
        // owner-only.
        let admin = user(3, &[Role::User, Role::Admin]);
        let r = recipe(10, 1, "Pie", 0);
        assert!(matches!(
            authorize_mutation(&admin, &r),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn sorts_descending_by_timestamp() {
        let mut recipes = vec![
            recipe(1, 1, "A", 1),
            recipe(2, 1, "B", 3),
            recipe(3, 1, "C", 2),
        ];
        sort_newest_first(&mut recipes);
        let names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
    }

    #[test]
    fn equal_timestamps_keep_store_order() {
        let mut recipes = vec![
            recipe(1, 1, "first", 5),
            recipe(2, 1, "second", 5),
            recipe(3, 1, "third", 5),
        ];
        sort_newest_first(&mut recipes);
        let ids: Vec<i64> = recipes.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }
}
