use std::sync::Arc;

use validator::Validate;

use crate::dto::recipe_dto::{CreateRecipePayload, UpdateRecipePayload};
use crate::error::{Error, Result};
use crate::models::recipe::Recipe;
use crate::repositories::{Page, PageRequest, RecipeRepository};

#[derive(Clone)]
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Recipe {} not found", id))
}

impl RecipeService {
    pub fn new(recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { recipes }
    }

    pub async fn create(&self, payload: CreateRecipePayload) -> Result<Recipe> {
        payload.validate()?;
        let recipe = self.recipes.create_recipe(&payload).await?;
        tracing::info!(recipe_id = recipe.id, "recipe created");
        Ok(recipe)
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Recipe>> {
        self.recipes.list_recipes(page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Recipe> {
        self.recipes.get_recipe(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(&self, id: i64, payload: UpdateRecipePayload) -> Result<Recipe> {
        payload.validate()?;
        if payload.is_empty() {
            return self.get_by_id(id).await;
        }
        let recipe = self
            .recipes
            .update_recipe(id, &payload)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(recipe_id = id, "recipe updated");
        Ok(recipe)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.recipes.delete_recipe(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(recipe_id = id, "recipe deleted");
        Ok(())
    }
}
