use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Json},
    Extension, Form,
};

use super::JsonBody;
use crate::{
    dto::auth_dto::{
        LoginPayload, MeResponse, PasswordGrantForm, RegisterPayload, TokenResponse, UserResponse,
    },
    error::{Error, Result},
    models::user::User,
    AppState,
};

/// Login credentials from either a JSON body or an OAuth2 password form.
pub struct Credentials(pub LoginPayload);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

#[async_trait]
impl<S> FromRequest<S> for Credentials
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        if is_form(&req) {
            let Form(form) = Form::<PasswordGrantForm>::from_request(req, state).await?;
            return Ok(Self(form.into()));
        }
        let Json(payload) = Json::<LoginPayload>::from_request(req, state).await?;
        Ok(Self(payload))
    }
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Invalid email or empty password"),
        (status = 409, description = "Email already registered")
    ),
    tag = "identity"
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: JsonBody<RegisterPayload>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let user = state.auth_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/token",
    request_body(
        content = LoginPayload,
        description = "JSON `{email, password}` or an OAuth2 form with `username` and `password`"
    ),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Incorrect email or password")
    ),
    tag = "identity"
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Credentials(payload): Credentials,
) -> Result<impl IntoResponse> {
    let token = state.auth_service.login(payload).await?;
    Ok(Json(token))
}

#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Authenticated user and the profile it owns", body = MeResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "identity"
)]
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
) -> Result<impl IntoResponse> {
    let me = state.auth_service.me(&caller).await?;
    Ok(Json(me))
}

#[utoipa::path(
    delete,
    path = "/me",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token, or user already gone"),
        (status = 409, description = "The account still owns a profile")
    ),
    security(("bearer_auth" = [])),
    tag = "identity"
)]
#[axum::debug_handler]
pub async fn delete_me(
    State(state): State<AppState>,
    Extension(caller): Extension<User>,
) -> Result<impl IntoResponse> {
    state.auth_service.delete_self(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}
