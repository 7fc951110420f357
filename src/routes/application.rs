use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};

use super::{IdPath, JsonBody, ListParams};
use crate::{
    dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload},
    error::Result,
    models::{application::Application, user::User},
    repositories::ApplicationPage,
    AppState,
};

#[utoipa::path(
    post,
    path = "/applications/",
    request_body = CreateApplicationPayload,
    responses(
        (status = 201, description = "Application created", body = Application),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Listing or the caller's seeker profile not found"),
        (status = 409, description = "Seeker already applied to this listing"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires the Job Seeker role, or names another seeker")
    ),
    security(("bearer_auth" = [])),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn create_application(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    payload: JsonBody<CreateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let application = state.application_service.create(&caller, payload).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/applications/",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 50 (default 5)")
    ),
    responses(
        (status = 200, description = "Applications visible to the caller", body = ApplicationPage),
        (status = 400, description = "Invalid paging parameters"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    query: ListParams,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = state.application_service.list(&caller, query.page()?).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/applications/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application found", body = Application),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = [])),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn get_application(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    patch,
    path = "/applications/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    request_body = UpdateApplicationPayload,
    responses(
        (status = 200, description = "Application updated", body = Application),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Caller is neither the applicant nor a recruiter of the listing's company"),
        (status = 404, description = "Application or listing not found"),
        (status = 409, description = "Seeker already applied to this listing")
    ),
    security(("bearer_auth" = [])),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn update_application(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    id: IdPath,
    payload: JsonBody<UpdateApplicationPayload>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let application = state.application_service.update(&caller, id, payload).await?;
    Ok(Json(application))
}

#[utoipa::path(
    delete,
    path = "/applications/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    responses(
        (status = 204, description = "Application deleted"),
        (status = 403, description = "Application belongs to another seeker"),
        (status = 404, description = "Application not found")
    ),
    security(("bearer_auth" = [])),
    tag = "applications"
)]
#[axum::debug_handler]
pub async fn delete_application(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
    id: IdPath,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    state.application_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
