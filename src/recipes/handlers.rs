use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    recipes::{
        dto::{CreatedRecipe, RecipePayload, RecipeResponse, SearchParams},
        service,
    },
    state::AppState,
    users::service as users,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            axum::routing::post(create_recipe).delete(delete_all_recipes),
        )
        .route("/recipes/search", get(search_recipes))
        .route(
            "/recipes/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Json(payload): Json<RecipePayload>,
) -> Result<(StatusCode, HeaderMap, Json<CreatedRecipe>), ApiError> {
    payload.validate()?;
    let owner = users::resolve_principal(&state.db, &email).await?;
    let recipe = service::create(&state.db, &payload, &owner).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/api/v1/recipes/{}", recipe.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }
    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedRecipe { id: recipe.id }),
    ))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let recipe = service::fetch(&state.db, id).await?;
    Ok(Json(recipe.into()))
}

#[instrument(skip(state, payload))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<RecipePayload>,
) -> Result<StatusCode, ApiError> {
    payload.validate()?;
    let actor = users::resolve_principal(&state.db, &email).await?;
    service::update(&state.db, id, &payload, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let actor = users::resolve_principal(&state.db, &email).await?;
    service::delete(&state.db, id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Admin-only: wipe the recipe collection. User records stay untouched.
#[instrument(skip(state))]
pub async fn delete_all_recipes(
    State(state): State<AppState>,
    AuthUser(email): AuthUser,
) -> Result<StatusCode, ApiError> {
    let actor = users::resolve_principal(&state.db, &email).await?;
    users::require_admin(&actor)?;
    service::delete_all(&state.db).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search takes exactly one of `category` / `name`.
#[instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    AuthUser(_email): AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let recipes = match (params.category.as_deref(), params.name.as_deref()) {
        (Some(category), None) => service::search_by_category(&state.db, category).await?,
        (None, Some(name)) => service::search_by_name(&state.db, name).await?,
        _ => {
            return Err(ApiError::Validation(
                "exactly one of category or name is required".into(),
            ))
        }
    };
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}
