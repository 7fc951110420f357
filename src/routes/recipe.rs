use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{IdPath, JsonBody, ListParams};
use crate::{
    dto::recipe_dto::{CreateRecipePayload, UpdateRecipePayload},
    error::Result,
    models::recipe::Recipe,
    repositories::RecipePage,
    AppState,
};

#[utoipa::path(
    post,
    path = "/recipes/",
    request_body = CreateRecipePayload,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
#[axum::debug_handler]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: JsonBody<CreateRecipePayload>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let recipe = state.recipe_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

#[utoipa::path(
    get,
    path = "/recipes/",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 50 (default 5)")
    ),
    responses(
        (status = 200, description = "Page of recipes", body = RecipePage),
        (status = 400, description = "Invalid paging parameters")
    ),
    tag = "recipes"
)]
#[axum::debug_handler]
pub async fn list_recipes(
    State(state): State<AppState>,
    query: ListParams,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = state.recipe_service.list(query.page()?).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe found", body = Recipe),
        (status = 404, description = "Recipe not found")
    ),
    tag = "recipes"
)]
#[axum::debug_handler]
pub async fn get_recipe(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let recipe = state.recipe_service.get_by_id(id).await?;
    Ok(Json(recipe))
}

#[utoipa::path(
    patch,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe ID")),
    request_body = UpdateRecipePayload,
    responses(
        (status = 200, description = "Recipe updated", body = Recipe),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
#[axum::debug_handler]
pub async fn update_recipe(
    State(state): State<AppState>,
    id: IdPath,
    payload: JsonBody<UpdateRecipePayload>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let recipe = state.recipe_service.update(id, payload).await?;
    Ok(Json(recipe))
}

#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    params(("id" = i64, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 404, description = "Recipe not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recipes"
)]
#[axum::debug_handler]
pub async fn delete_recipe(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    state.recipe_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
