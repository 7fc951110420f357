use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "work_mode")]
pub enum WorkMode {
    #[serde(rename = "On_site")]
    #[sqlx(rename = "On_site")]
    OnSite,
    Remote,
    Hybrid,
}

impl WorkMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkMode::OnSite => "On_site",
            WorkMode::Remote => "Remote",
            WorkMode::Hybrid => "Hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "salary_range")]
pub enum SalaryRange {
    #[serde(rename = "3L-5L")]
    #[sqlx(rename = "3L-5L")]
    ThreeToFive,
    #[serde(rename = "5L-9L")]
    #[sqlx(rename = "5L-9L")]
    FiveToNine,
    #[serde(rename = "9L-15L")]
    #[sqlx(rename = "9L-15L")]
    NineToFifteen,
    #[serde(rename = "15L-22L")]
    #[sqlx(rename = "15L-22L")]
    FifteenToTwentyTwo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "employment_type")]
pub enum EmploymentType {
    #[serde(rename = "Full-Time")]
    #[sqlx(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    #[sqlx(rename = "Part-Time")]
    PartTime,
    Apprenticeship,
    #[serde(rename = "Intern")]
    #[sqlx(rename = "Intern")]
    Internship,
}

impl EmploymentType {
    pub const ALL: [EmploymentType; 4] = [
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Apprenticeship,
        EmploymentType::Internship,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "Full-Time",
            EmploymentType::PartTime => "Part-Time",
            EmploymentType::Apprenticeship => "Apprenticeship",
            EmploymentType::Internship => "Intern",
        }
    }
}

/// Case-insensitive match on the display label, used by listing search.
impl FromStr for EmploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let labels: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!(
                    "unknown employment type '{}', expected one of: {}",
                    wanted,
                    labels.join(", ")
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "listing_status")]
pub enum ListingStatus {
    #[serde(rename = "Still accepting")]
    #[sqlx(rename = "Still accepting")]
    Accepting,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Listing {
    pub id: i64,
    pub company_id: i64,
    pub title: String,
    pub description: String,
    pub location: WorkMode,
    pub salary_range: SalaryRange,
    pub employment_type: EmploymentType,
    pub posted_date: NaiveDate,
    pub application_deadline: NaiveDate,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employment_type_parses_labels_case_insensitively() {
        assert_eq!("full-time".parse::<EmploymentType>(), Ok(EmploymentType::FullTime));
        assert_eq!(" INTERN ".parse::<EmploymentType>(), Ok(EmploymentType::Internship));
        assert!("contract".parse::<EmploymentType>().is_err());
    }

    #[test]
    fn enums_serialize_to_their_labels() {
        assert_eq!(serde_json::to_value(WorkMode::OnSite).unwrap(), "On_site");
        assert_eq!(serde_json::to_value(SalaryRange::NineToFifteen).unwrap(), "9L-15L");
        assert_eq!(serde_json::to_value(ListingStatus::Accepting).unwrap(), "Still accepting");
    }
}
