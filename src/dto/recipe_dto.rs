use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::recipe::RecipeCategory;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRecipePayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub category: RecipeCategory,
    #[validate(length(min = 1))]
    pub method: String,
    #[validate(range(min = 1))]
    pub prep_time_minutes: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRecipePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub category: Option<RecipeCategory>,
    #[validate(length(min = 1))]
    pub method: Option<String>,
    #[validate(range(min = 1))]
    pub prep_time_minutes: Option<i32>,
}

impl UpdateRecipePayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.method.is_none()
            && self.prep_time_minutes.is_none()
    }
}
