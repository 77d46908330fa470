use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{error::ApiError, recipes::repo::Recipe};

/// Client-supplied recipe content, used for both create and update.
/// Owner and timestamp are never taken from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipePayload {
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub directions: Vec<String>,
}

impl RecipePayload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("name must not be blank".into()));
        }
        if self.category.trim().is_empty() {
            return Err(ApiError::Validation("category must not be blank".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation("description must not be blank".into()));
        }
        if self.ingredients.is_empty() {
            return Err(ApiError::Validation("ingredients must not be empty".into()));
        }
        if self.directions.is_empty() {
            return Err(ApiError::Validation("directions must not be empty".into()));
        }
        Ok(())
    }
}

/// Recipe as returned to clients. Id and owner stay internal.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub name: String,
    pub category: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        Self {
            name: r.name,
            category: r.category,
            description: r.description,
            ingredients: r.ingredients,
            directions: r.directions,
            date: r.date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedRecipe {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub category: Option<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RecipePayload {
        RecipePayload {
            name: "Mint Tea".into(),
            category: "beverage".into(),
            description: "Light, fresh tea".into(),
            ingredients: vec!["boiled water".into(), "honey".into(), "mint leaves".into()],
            directions: vec!["Boil water".into(), "Steep the mint".into()],
        }
    }

    #[test]
    fn complete_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn blank_text_fields_rejected() {
        let mut p = payload();
        p.name = "   ".into();
        assert!(matches!(p.validate(), Err(ApiError::Validation(_))));

        let mut p = payload();
        p.category = "".into();
        assert!(matches!(p.validate(), Err(ApiError::Validation(_))));

        let mut p = payload();
        p.description = "\t".into();
        assert!(matches!(p.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn empty_lists_rejected() {
        let mut p = payload();
        p.ingredients.clear();
        assert!(matches!(p.validate(), Err(ApiError::Validation(_))));

        let mut p = payload();
        p.directions.clear();
        assert!(matches!(p.validate(), Err(ApiError::Validation(_))));
    }

    #[test]
    fn response_omits_id_and_owner() {
        let response = RecipeResponse::from(Recipe {
            id: 99,
            owner_id: 7,
            name: "Mint Tea".into(),
            category: "beverage".into(),
            description: "Light, fresh tea".into(),
            ingredients: vec!["mint".into()],
            directions: vec!["steep".into()],
            date: OffsetDateTime::UNIX_EPOCH,
        });
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(!json.contains("owner"));
        assert!(json.contains("Mint Tea"));
    }

    #[test]
    fn missing_lists_default_to_empty_and_fail_validation() {
        let p: RecipePayload = serde_json::from_str(
            r#"{"name":"Toast","category":"breakfast","description":"Bread, but better"}"#,
        )
        .unwrap();
        assert!(p.ingredients.is_empty());
        assert!(matches!(p.validate(), Err(ApiError::Validation(_))));
    }
}
