use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSeekerPayload {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub desired_job_title: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(range(min = 0))]
    pub current_salary: i64,
    #[validate(length(max = 255))]
    pub past_experience: Option<String>,
    #[validate(length(max = 255))]
    pub skill_set: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSeekerPayload {
    #[validate(length(min = 1))]
    pub first_name: Option<String>,
    #[validate(length(min = 1))]
    pub last_name: Option<String>,
    #[validate(length(min = 1))]
    pub desired_job_title: Option<String>,
    #[validate(length(min = 1))]
    pub phone_number: Option<String>,
    #[validate(length(min = 1))]
    pub location: Option<String>,
    #[validate(range(min = 0))]
    pub current_salary: Option<i64>,
    /// Absent keeps the stored value, `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub past_experience: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub skill_set: Option<Option<String>>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

const MAX_SECTION_CHARS: usize = 255;

impl UpdateSeekerPayload {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.desired_job_title.is_none()
            && self.phone_number.is_none()
            && self.location.is_none()
            && self.current_salary.is_none()
            && self.past_experience.is_none()
            && self.skill_set.is_none()
    }

    /// Length limits for the nullable sections.
    pub fn check_sections(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("past_experience", &self.past_experience),
            ("skill_set", &self.skill_set),
        ] {
            if let Some(Some(text)) = value {
                if text.chars().count() > MAX_SECTION_CHARS {
                    errors.add(field, ValidationError::new("length"));
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_clears_and_absent_keeps() {
        let payload: UpdateSeekerPayload =
            serde_json::from_str(r#"{ "skill_set": null }"#).unwrap();
        assert_eq!(payload.skill_set, Some(None));
        assert_eq!(payload.past_experience, None);
        assert!(!payload.is_empty());
    }

    #[test]
    fn oversized_section_is_reported_by_field() {
        let payload = UpdateSeekerPayload {
            past_experience: Some(Some("x".repeat(256))),
            ..Default::default()
        };
        let errors = payload.check_sections().unwrap_err();
        assert!(errors.field_errors().contains_key("past_experience"));
    }
}
