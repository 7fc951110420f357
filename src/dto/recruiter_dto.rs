use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRecruiterPayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(range(min = 1))]
    pub company_id: i64,
    #[validate(length(min = 1))]
    pub position: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateRecruiterPayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(range(min = 1))]
    pub company_id: Option<i64>,
    #[validate(length(min = 1))]
    pub position: Option<String>,
    #[validate(length(min = 1))]
    pub phone_number: Option<String>,
}

impl UpdateRecruiterPayload {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.company_id.is_none()
            && self.position.is_none()
            && self.phone_number.is_none()
    }
}
