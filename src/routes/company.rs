use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{IdPath, JsonBody, ListParams};
use crate::{
    dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload},
    error::Result,
    models::company::Company,
    repositories::CompanyPage,
    AppState,
};

#[utoipa::path(
    post,
    path = "/companies/",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 409, description = "Email already in use"),
        (status = 400, description = "Invalid payload"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires the Recruiter role")
    ),
    security(("bearer_auth" = [])),
    tag = "companies"
)]
#[axum::debug_handler]
pub async fn create_company(
    State(state): State<AppState>,
    payload: JsonBody<CreateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let company = state.company_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

#[utoipa::path(
    get,
    path = "/companies/",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 50 (default 5)")
    ),
    responses(
        (status = 200, description = "Page of companies", body = CompanyPage),
        (status = 400, description = "Invalid paging parameters")
    ),
    tag = "companies"
)]
#[axum::debug_handler]
pub async fn list_companies(
    State(state): State<AppState>,
    query: ListParams,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = state.company_service.list(query.page()?).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/companies/{id}",
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company found", body = Company),
        (status = 404, description = "Company not found")
    ),
    tag = "companies"
)]
#[axum::debug_handler]
pub async fn get_company(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let company = state.company_service.get_by_id(id).await?;
    Ok(Json(company))
}

#[utoipa::path(
    patch,
    path = "/companies/{id}",
    params(("id" = i64, Path, description = "Company ID")),
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Company not found")
    ),
    security(("bearer_auth" = [])),
    tag = "companies"
)]
#[axum::debug_handler]
pub async fn update_company(
    State(state): State<AppState>,
    id: IdPath,
    payload: JsonBody<UpdateCompanyPayload>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let company = state.company_service.update(id, payload).await?;
    Ok(Json(company))
}

#[utoipa::path(
    delete,
    path = "/companies/{id}",
    params(("id" = i64, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 409, description = "Company still has recruiters or listings"),
        (status = 404, description = "Company not found")
    ),
    security(("bearer_auth" = [])),
    tag = "companies"
)]
#[axum::debug_handler]
pub async fn delete_company(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    state.company_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
