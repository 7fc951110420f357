use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Recruiter {
    pub id: i64,
    /// Account that owns this profile; one recruiter profile per user.
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub company_id: i64,
    pub position: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
