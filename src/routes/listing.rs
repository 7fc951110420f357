use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use super::{IdPath, JsonBody, ListParams};
use crate::{
    dto::listing_dto::{CreateListingPayload, ListingSearchQuery, UpdateListingPayload},
    error::Result,
    models::listing::Listing,
    repositories::ListingPage,
    AppState,
};

#[utoipa::path(
    post,
    path = "/listings/",
    request_body = CreateListingPayload,
    responses(
        (status = 201, description = "Listing created", body = Listing),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Company not found"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Requires the Recruiter role")
    ),
    security(("bearer_auth" = [])),
    tag = "listings"
)]
#[axum::debug_handler]
pub async fn create_listing(
    State(state): State<AppState>,
    payload: JsonBody<CreateListingPayload>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let listing = state.listing_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

#[utoipa::path(
    get,
    path = "/listings/",
    params(
        ("skip" = Option<i64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 50 (default 5)")
    ),
    responses(
        (status = 200, description = "Page of listings", body = ListingPage),
        (status = 400, description = "Invalid paging parameters")
    ),
    tag = "listings"
)]
#[axum::debug_handler]
pub async fn list_listings(
    State(state): State<AppState>,
    query: ListParams,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = state.listing_service.list(query.page()?).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/listings/{id}",
    params(("id" = i64, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing found", body = Listing),
        (status = 404, description = "Listing not found")
    ),
    tag = "listings"
)]
#[axum::debug_handler]
pub async fn get_listing(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let listing = state.listing_service.get_by_id(id).await?;
    Ok(Json(listing))
}

#[utoipa::path(
    patch,
    path = "/listings/{id}",
    params(("id" = i64, Path, description = "Listing ID")),
    request_body = UpdateListingPayload,
    responses(
        (status = 200, description = "Listing updated", body = Listing),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "listings"
)]
#[axum::debug_handler]
pub async fn update_listing(
    State(state): State<AppState>,
    id: IdPath,
    payload: JsonBody<UpdateListingPayload>,
) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let listing = state.listing_service.update(id, payload).await?;
    Ok(Json(listing))
}

#[utoipa::path(
    delete,
    path = "/listings/{id}",
    params(("id" = i64, Path, description = "Listing ID")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 409, description = "Listing still has applications"),
        (status = 404, description = "Listing not found")
    ),
    security(("bearer_auth" = [])),
    tag = "listings"
)]
#[axum::debug_handler]
pub async fn delete_listing(State(state): State<AppState>, id: IdPath) -> Result<impl IntoResponse> {
    let Path(id) = id?;
    state.listing_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/listings/search",
    params(
        ("title" = Option<String>, Query, description = "Case-insensitive substring of the title"),
        ("location" = Option<String>, Query, description = "Case-insensitive substring of the work mode"),
        ("employment_type" = Option<String>, Query, description = "Employment type label, any case"),
        ("skip" = Option<i64>, Query, description = "Records to skip (default 0)"),
        ("limit" = Option<i64>, Query, description = "Page size, 1 to 50 (default 5)")
    ),
    responses(
        (status = 200, description = "Matching listings, possibly empty", body = ListingPage),
        (status = 400, description = "Unknown employment type or invalid paging"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "listings"
)]
#[axum::debug_handler]
pub async fn search_listings(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListingSearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse> {
    let Query(query) = query?;
    let page = query.page()?;
    let filters = query.filters()?;
    let listings = state.listing_service.search(filters, page).await?;
    Ok(Json(listings))
}
