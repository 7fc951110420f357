use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::recruiter::Recruiter;
use crate::models::seeker::Seeker;
use crate::models::user::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterPayload {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// OAuth2 password-grant form; `username` carries the email.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordGrantForm {
    pub username: String,
    pub password: String,
}

impl From<PasswordGrantForm> for LoginPayload {
    fn from(form: PasswordGrantForm) -> Self {
        Self {
            email: form.username,
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
        }
    }
}

/// The caller's account together with whichever profile it owns.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub recruiter_profile: Option<Recruiter>,
    pub seeker_profile: Option<Seeker>,
}
