use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use super::{IdPath, JsonBody, ListParams};
use crate::{
    dto::recruiter_dto::{CreateRecruiterPayload, UpdateRecruiterPayload},
    error::Result,
    models::user::User,
    models::recruiter::Recruiter,
    repositories::RecruiterPage,
    AppState,
};

#[utoipa::path(
    post,
    path = "/recruiters/",
    request_body = CreateRecruiterPayload,
    responses(
        (status = 201, description = "Recruiter created", body = Recruiter),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Company not found"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires the Recruiter role"),
        (status = 409, description = "The caller already has a recruiter profile")
    ),
    security(("bearer_auth" = [])),
    tag = "recruiters"
)]
#[axum::debug_handler]
pub async fn create_recruiter(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    payload: JsonBody<CreateRecruiterPayload>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let recruiter = state.recruiter_service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(recruiter)))
}

#[utoipa::path(
    get,
    path = "/recruiters/",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 50 (default 5)")
    ),
    responses(
        (status = 200, description = "Page of recruiters", body = RecruiterPage),
        (status = 400, description = "Invalid paging parameters")
    ),
    tag = "recruiters"
)]
#[axum::debug_handler]
pub async fn list_recruiters(
    State(state): State<AppState>,
    query: ListParams,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = state.recruiter_service.list(query.page()?).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/recruiters/{id}",
    params(("id" = i64, Path, description = "Recruiter ID")),
    responses(
        (status = 200, description = "Recruiter found", body = Recruiter),
        (status = 404, description = "Recruiter not found")
    ),
    tag = "recruiters"
)]
#[axum::debug_handler]
pub async fn get_recruiter(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let recruiter = state.recruiter_service.get_by_id(id).await?;
    Ok(Json(recruiter))
}

#[utoipa::path(
    patch,
    path = "/recruiters/{id}",
    params(("id" = i64, Path, description = "Recruiter ID")),
    request_body = UpdateRecruiterPayload,
    responses(
        (status = 200, description = "Recruiter updated", body = Recruiter),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "Recruiter not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recruiters"
)]
#[axum::debug_handler]
pub async fn update_recruiter(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    id: IdPath,
    payload: JsonBody<UpdateRecruiterPayload>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let recruiter = state.recruiter_service.update(&caller, id, payload).await?;
    Ok(Json(recruiter))
}

#[utoipa::path(
    delete,
    path = "/recruiters/{id}",
    params(("id" = i64, Path, description = "Recruiter ID")),
    responses(
        (status = 204, description = "Recruiter deleted"),
        (status = 403, description = "Profile belongs to another user"),
        (status = 404, description = "Recruiter not found")
    ),
    security(("bearer_auth" = [])),
    tag = "recruiters"
)]
#[axum::debug_handler]
pub async fn delete_recruiter(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    id: IdPath,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    state.recruiter_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
