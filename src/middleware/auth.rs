use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::{Error, Result};
use crate::models::user::Role;
use crate::AppState;

fn bearer_token(req: &Request) -> Result<&str> {
    let Some(auth_header) = req.headers().get(AUTHORIZATION) else {
        return Err(Error::Unauthorized("Not authenticated".to_string()));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(Error::Unauthorized("Malformed authorization header".to_string()));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(Error::Unauthorized("Unsupported authorization scheme".to_string()));
    };
    Ok(token.trim())
}

/// Validates the bearer token, loads the caller's account, enforces
/// `allowed` (empty means any role) and stores the caller's
/// [`User`](crate::models::user::User) in the request extensions.
pub async fn authorize(state: &AppState, mut req: Request, next: Next, allowed: &[Role]) -> Result<Response> {
    let claims = state.auth_service.verify_token(bearer_token(&req)?)?;
    let caller = state.auth_service.current_user(&claims).await?;
    if !allowed.is_empty() && !allowed.contains(&caller.role) {
        tracing::warn!(
            user_id = caller.id,
            role = caller.role.as_str(),
            path = %req.uri().path(),
            "role not permitted"
        );
        return Err(Error::Forbidden("Operation not permitted for this role".to_string()));
    }
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Result<Response> {
    authorize(&state, req, next, &[]).await
}

pub async fn require_recruiter(State(state): State<AppState>, req: Request, next: Next) -> Result<Response> {
    authorize(&state, req, next, &[Role::Recruiter]).await
}

pub async fn require_job_seeker(State(state): State<AppState>, req: Request, next: Next) -> Result<Response> {
    authorize(&state, req, next, &[Role::JobSeeker]).await
}
