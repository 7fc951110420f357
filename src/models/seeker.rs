use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Seeker {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub desired_job_title: String,
    pub phone_number: String,
    pub location: String,
    pub current_salary: i64,
    pub past_experience: Option<String>,
    pub skill_set: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProfileCompletion {
    pub overall_percentage: f64,
    pub bio_percentage: u8,
    pub experience_percentage: u8,
    pub skills_percentage: u8,
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl Seeker {
    fn bio_fields(&self) -> [bool; 6] {
        [
            filled(&self.first_name),
            filled(&self.last_name),
            filled(&self.desired_job_title),
            filled(&self.phone_number),
            filled(&self.location),
            // current_salary is a required integer
            true,
        ]
    }

    /// Share of populated profile fields, plus all-or-nothing section flags.
    pub fn completion(&self) -> ProfileCompletion {
        let bio = self.bio_fields();
        let experience = self.past_experience.as_deref().is_some_and(filled);
        let skills = self.skill_set.as_deref().is_some_and(filled);

        let total = bio.len() + 2;
        let populated = bio.iter().filter(|f| **f).count()
            + usize::from(experience)
            + usize::from(skills);

        let section = |complete: bool| if complete { 100 } else { 0 };

        ProfileCompletion {
            overall_percentage: (populated as f64 * 100.0) / total as f64,
            bio_percentage: section(bio.iter().all(|f| *f)),
            experience_percentage: section(experience),
            skills_percentage: section(skills),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeker() -> Seeker {
        let now = Utc::now();
        Seeker {
            id: 1,
            user_id: 1,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            desired_job_title: "Engineer".into(),
            phone_number: "555-0100".into(),
            location: "London".into(),
            current_salary: 0,
            past_experience: None,
            skill_set: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn required_fields_only_scores_below_full() {
        let score = seeker().completion();
        assert_eq!(score.overall_percentage, 75.0);
        assert_eq!(score.bio_percentage, 100);
        assert_eq!(score.experience_percentage, 0);
        assert_eq!(score.skills_percentage, 0);
    }

    #[test]
    fn blank_optional_fields_do_not_count() {
        let mut s = seeker();
        s.skill_set = Some("   ".into());
        s.past_experience = Some("5 years".into());
        let score = s.completion();
        assert_eq!(score.overall_percentage, 87.5);
        assert_eq!(score.experience_percentage, 100);
        assert_eq!(score.skills_percentage, 0);
    }

    #[test]
    fn complete_profile_scores_full() {
        let mut s = seeker();
        s.skill_set = Some("rust, sql".into());
        s.past_experience = Some("5 years".into());
        assert_eq!(s.completion().overall_percentage, 100.0);
    }
}
