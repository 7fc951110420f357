use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "industry")]
pub enum Industry {
    Manufacturing,
    Education,
    Finance,
    Construction,
    Chemical,
    Electronics,
    #[serde(rename = "Information Technology")]
    #[sqlx(rename = "Information Technology")]
    InformationTechnology,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Company {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub industry: Industry,
    pub location: String,
    pub description: String,
    pub website: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
