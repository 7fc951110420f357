use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "application_status")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    #[serde(rename = "Under Review", alias = "Reviewed")]
    #[sqlx(rename = "Under Review")]
    UnderReview,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Application {
    pub id: i64,
    pub listing_id: i64,
    pub seeker_id: i64,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
