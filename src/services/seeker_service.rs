use std::sync::Arc;

use validator::Validate;

use crate::dto::seeker_dto::{CreateSeekerPayload, UpdateSeekerPayload};
use crate::error::{Error, Result};
use crate::models::seeker::{ProfileCompletion, Seeker};
use crate::models::user::User;
use crate::repositories::{Page, PageRequest, SeekerRepository};

#[derive(Clone)]
pub struct SeekerService {
    seekers: Arc<dyn SeekerRepository>,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Seeker {} not found", id))
}

fn ensure_owner(seeker: &Seeker, caller: &User) -> Result<()> {
    if seeker.user_id != caller.id {
        tracing::warn!(seeker_id = seeker.id, user_id = caller.id, "seeker profile owned by another user");
        return Err(Error::Forbidden("Cannot modify another user's profile".to_string()));
    }
    Ok(())
}

impl SeekerService {
    pub fn new(seekers: Arc<dyn SeekerRepository>) -> Self {
        Self { seekers }
    }

    pub async fn create(&self, caller: &User, payload: CreateSeekerPayload) -> Result<Seeker> {
        payload.validate()?;
        if self.seekers.find_seeker_by_user(caller.id).await?.is_some() {
            return Err(Error::Conflict(
                "A job seeker profile already exists for this user".to_string(),
            ));
        }
        let seeker = self.seekers.create_seeker(caller.id, &payload).await?;
        tracing::info!(seeker_id = seeker.id, user_id = caller.id, "seeker created");
        Ok(seeker)
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Seeker>> {
        self.seekers.list_seekers(page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Seeker> {
        self.seekers.get_seeker(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn completion(&self, id: i64) -> Result<ProfileCompletion> {
        Ok(self.get_by_id(id).await?.completion())
    }

    pub async fn update(&self, caller: &User, id: i64, payload: UpdateSeekerPayload) -> Result<Seeker> {
        payload.validate()?;
        payload.check_sections()?;
        let current = self.get_by_id(id).await?;
        ensure_owner(&current, caller)?;
        if payload.is_empty() {
            return Ok(current);
        }
        let seeker = self
            .seekers
            .update_seeker(id, &payload)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(seeker_id = id, "seeker updated");
        Ok(seeker)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<()> {
        let current = self.get_by_id(id).await?;
        ensure_owner(&current, caller)?;
        if self.seekers.seeker_has_dependents(id).await? {
            tracing::warn!(seeker_id = id, "seeker still has applications");
            return Err(Error::Conflict(format!("Seeker {} still has applications", id)));
        }
        if !self.seekers.delete_seeker(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(seeker_id = id, "seeker deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::repositories::MockSeekerRepository;
    use crate::utils::time::now;

    fn caller(id: i64) -> User {
        User {
            id,
            email: format!("seeker{}@example.com", id),
            password_hash: String::new(),
            role: Role::JobSeeker,
            created_at: now(),
        }
    }

    fn profile(user_id: i64) -> Seeker {
        Seeker {
            id: 8,
            user_id,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            desired_job_title: "Engineer".into(),
            phone_number: "555-0100".into(),
            location: "London".into(),
            current_salary: 10,
            past_experience: Some("5 years".into()),
            skill_set: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[tokio::test]
    async fn another_users_profile_is_forbidden() {
        let mut seekers = MockSeekerRepository::new();
        seekers.expect_get_seeker().returning(|_| Ok(Some(profile(1))));
        seekers.expect_update_seeker().never();
        seekers.expect_seeker_has_dependents().never();
        seekers.expect_delete_seeker().never();
        let service = SeekerService::new(Arc::new(seekers));

        let patch = UpdateSeekerPayload {
            first_name: Some("Pwned".into()),
            ..Default::default()
        };
        assert!(matches!(service.update(&caller(2), 8, patch).await, Err(Error::Forbidden(_))));
        assert!(matches!(service.delete(&caller(2), 8).await, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn second_profile_conflicts_before_insert() {
        let mut seekers = MockSeekerRepository::new();
        seekers
            .expect_find_seeker_by_user()
            .returning(|user_id| Ok(Some(profile(user_id))));
        seekers.expect_create_seeker().never();
        let service = SeekerService::new(Arc::new(seekers));

        let payload = CreateSeekerPayload {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            desired_job_title: "Engineer".into(),
            phone_number: "555-0100".into(),
            location: "London".into(),
            current_salary: 10,
            past_experience: None,
            skill_set: None,
        };
        assert!(matches!(service.create(&caller(1), payload).await, Err(Error::Conflict(_))));
    }

    #[tokio::test]
    async fn oversized_section_is_rejected_before_lookup() {
        let mut seekers = MockSeekerRepository::new();
        seekers.expect_get_seeker().never();
        let service = SeekerService::new(Arc::new(seekers));

        let patch = UpdateSeekerPayload {
            skill_set: Some(Some("y".repeat(300))),
            ..Default::default()
        };
        assert!(matches!(service.update(&caller(1), 8, patch).await, Err(Error::Validation(_))));
    }
}
