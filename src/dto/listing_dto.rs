use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::listing::{EmploymentType, ListingStatus, SalaryRange, WorkMode};
use crate::repositories::{ListingFilters, PageRequest};
use crate::utils::time::today;

use super::pagination::ListQuery;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateListingPayload {
    #[validate(range(min = 1))]
    pub company_id: i64,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub location: WorkMode,
    pub salary_range: SalaryRange,
    pub employment_type: EmploymentType,
    #[serde(default = "today")]
    pub posted_date: NaiveDate,
    pub application_deadline: NaiveDate,
    pub status: ListingStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateListingPayload {
    #[validate(range(min = 1))]
    pub company_id: Option<i64>,
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub location: Option<WorkMode>,
    pub salary_range: Option<SalaryRange>,
    pub employment_type: Option<EmploymentType>,
    pub posted_date: Option<NaiveDate>,
    pub application_deadline: Option<NaiveDate>,
    pub status: Option<ListingStatus>,
}

impl UpdateListingPayload {
    pub fn is_empty(&self) -> bool {
        self.company_id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.salary_range.is_none()
            && self.employment_type.is_none()
            && self.posted_date.is_none()
            && self.application_deadline.is_none()
            && self.status.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, Validate)]
#[serde(default)]
pub struct ListingSearchQuery {
    pub title: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    #[validate(range(min = 0))]
    pub skip: Option<i64>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<i64>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ListingSearchQuery {
    pub fn page(&self) -> Result<PageRequest> {
        ListQuery {
            skip: self.skip,
            limit: self.limit,
        }
        .page()
    }

    pub fn filters(&self) -> Result<ListingFilters> {
        let employment_type = match non_blank(&self.employment_type) {
            Some(raw) => Some(raw.parse::<EmploymentType>().map_err(Error::BadRequest)?),
            None => None,
        };
        Ok(ListingFilters {
            title: non_blank(&self.title),
            location: non_blank(&self.location),
            employment_type,
        })
    }
}
