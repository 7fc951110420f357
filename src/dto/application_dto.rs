use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::application::ApplicationStatus;
use crate::utils::time::today;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateApplicationPayload {
    #[validate(range(min = 1))]
    pub listing_id: i64,
    /// Defaults to the caller's own seeker profile.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub seeker_id: Option<i64>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default = "today")]
    pub applied_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateApplicationPayload {
    #[validate(range(min = 1))]
    pub listing_id: Option<i64>,
    #[validate(range(min = 1))]
    pub seeker_id: Option<i64>,
    pub status: Option<ApplicationStatus>,
    pub applied_date: Option<NaiveDate>,
}

impl UpdateApplicationPayload {
    pub fn is_empty(&self) -> bool {
        self.listing_id.is_none()
            && self.seeker_id.is_none()
            && self.status.is_none()
            && self.applied_date.is_none()
    }
}
