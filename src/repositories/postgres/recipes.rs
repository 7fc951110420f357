use async_trait::async_trait;

use super::{delete_by_id, fetch_page, PgStore};
use crate::dto::recipe_dto::{CreateRecipePayload, UpdateRecipePayload};
use crate::error::Result;
use crate::models::recipe::Recipe;
use crate::repositories::{Page, PageRequest, RecipeRepository};

const COLUMNS: &str = "id, name, category, method, prep_time_minutes, created_at, updated_at";

#[async_trait]
impl RecipeRepository for PgStore {
    async fn create_recipe(&self, payload: &CreateRecipePayload) -> Result<Recipe> {
        let query = format!(
            r#"
            INSERT INTO recipes (name, category, method, prep_time_minutes)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(&payload.name)
            .bind(payload.category)
            .bind(&payload.method)
            .bind(payload.prep_time_minutes)
            .fetch_one(&self.pool)
            .await?;
        Ok(recipe)
    }

    async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>> {
        let query = format!("SELECT {} FROM recipes WHERE id = $1", COLUMNS);
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(recipe)
    }

    async fn list_recipes(&self, page: PageRequest) -> Result<Page<Recipe>> {
        fetch_page(&self.pool, "recipes", COLUMNS, page).await
    }

    async fn update_recipe(&self, id: i64, payload: &UpdateRecipePayload) -> Result<Option<Recipe>> {
        let query = format!(
            r#"
            UPDATE recipes
            SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                method = COALESCE($4, method),
                prep_time_minutes = COALESCE($5, prep_time_minutes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&payload.name)
            .bind(payload.category)
            .bind(&payload.method)
            .bind(payload.prep_time_minutes)
            .fetch_optional(&self.pool)
            .await?;
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.pool, "recipes", id).await
    }
}
