use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use super::{IdPath, JsonBody, ListParams};
use crate::{
    dto::seeker_dto::{CreateSeekerPayload, UpdateSeekerPayload},
    error::Result,
    models::user::User,
    models::seeker::{ProfileCompletion, Seeker},
    repositories::SeekerPage,
    AppState,
};

#[utoipa::path(
    post,
    path = "/seekers/",
    request_body = CreateSeekerPayload,
    responses(
        (status = 201, description = "Seeker created", body = Seeker),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires the Job Seeker role"),
        (status = 409, description = "The caller already has a seeker profile")
    ),
    security(("bearer_auth" = [])),
    tag = "seekers"
)]
#[axum::debug_handler]
pub async fn create_seeker(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    payload: JsonBody<CreateSeekerPayload>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let seeker = state.seeker_service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(seeker)))
}

#[utoipa::path(
    get,
    path = "/seekers/",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 50 (default 5)")
    ),
    responses(
        (status = 200, description = "Page of seekers", body = SeekerPage),
        (status = 400, description = "Invalid paging parameters")
    ),
    tag = "seekers"
)]
#[axum::debug_handler]
pub async fn list_seekers(
    State(state): State<AppState>,
    query: ListParams,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = state.seeker_service.list(query.page()?).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/seekers/{id}",
    params(("id" = i64, Path, description = "Seeker ID")),
    responses(
        (status = 200, description = "Seeker found", body = Seeker),
        (status = 404, description = "Seeker not found")
    ),
    tag = "seekers"
)]
#[axum::debug_handler]
pub async fn get_seeker(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let seeker = state.seeker_service.get_by_id(id).await?;
    Ok(Json(seeker))
}

#[utoipa::path(
    patch,
    path = "/seekers/{id}",
    params(("id" = i64, Path, description = "Seeker ID")),
    request_body = UpdateSeekerPayload,
    responses(
        (status = 200, description = "Seeker updated", body = Seeker),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "Seeker not found")
    ),
    security(("bearer_auth" = [])),
    tag = "seekers"
)]
#[axum::debug_handler]
pub async fn update_seeker(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    id: IdPath,
    payload: JsonBody<UpdateSeekerPayload>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let seeker = state.seeker_service.update(&caller, id, payload).await?;
    Ok(Json(seeker))
}

#[utoipa::path(
    delete,
    path = "/seekers/{id}",
    params(("id" = i64, Path, description = "Seeker ID")),
    responses(
        (status = 204, description = "Seeker deleted"),
        (status = 403, description = "Profile belongs to another user"),
        (status = 409, description = "Seeker still has applications"),
        (status = 404, description = "Seeker not found")
    ),
    security(("bearer_auth" = [])),
    tag = "seekers"
)]
#[axum::debug_handler]
pub async fn delete_seeker(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    id: IdPath,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    state.seeker_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/seekers/{id}/completion",
    params(("id" = i64, Path, description = "Seeker ID")),
    responses(
        (status = 200, description = "Profile completion score", body = ProfileCompletion),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Seeker not found")
    ),
    security(("bearer_auth" = [])),
    tag = "seekers"
)]
#[axum::debug_handler]
pub async fn get_completion(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let completion = state.seeker_service.completion(id).await?;
    Ok(Json(completion))
}
