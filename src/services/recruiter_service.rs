use std::sync::Arc;

use validator::Validate;

use crate::dto::recruiter_dto::{CreateRecruiterPayload, UpdateRecruiterPayload};
use crate::error::{Error, Result};
use crate::models::recruiter::Recruiter;
use crate::models::user::User;
use crate::repositories::{CompanyRepository, Page, PageRequest, RecruiterRepository};

#[derive(Clone)]
pub struct RecruiterService {
    recruiters: Arc<dyn RecruiterRepository>,
    companies: Arc<dyn CompanyRepository>,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Recruiter {} not found", id))
}

fn ensure_owner(recruiter: &Recruiter, caller: &User) -> Result<()> {
    if recruiter.user_id != caller.id {
        tracing::warn!(recruiter_id = recruiter.id, user_id = caller.id, "recruiter profile owned by another user");
        return Err(Error::Forbidden("Cannot modify another user's profile".to_string()));
    }
    Ok(())
}

impl RecruiterService {
    pub fn new(
        recruiters: Arc<dyn RecruiterRepository>,
        companies: Arc<dyn CompanyRepository>,
    ) -> Self {
        Self {
            recruiters,
            companies,
        }
    }

    async fn ensure_company(&self, company_id: i64) -> Result<()> {
        if self.companies.get_company(company_id).await?.is_none() {
            tracing::warn!(company_id, "recruiter references a missing company");
            return Err(Error::NotFound(format!("Company {} not found", company_id)));
        }
        Ok(())
    }

    pub async fn create(&self, caller: &User, payload: CreateRecruiterPayload) -> Result<Recruiter> {
        payload.validate()?;
        self.ensure_company(payload.company_id).await?;
        if self.recruiters.find_recruiter_by_user(caller.id).await?.is_some() {
            return Err(Error::Conflict(
                "Recruiter profile already exists for this user".to_string(),
            ));
        }
        let recruiter = self.recruiters.create_recruiter(caller.id, &payload).await?;
        tracing::info!(recruiter_id = recruiter.id, company_id = recruiter.company_id, "recruiter created");
        Ok(recruiter)
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Recruiter>> {
        self.recruiters.list_recruiters(page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Recruiter> {
        self.recruiters.get_recruiter(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(
        &self,
        caller: &User,
        id: i64,
        payload: UpdateRecruiterPayload,
    ) -> Result<Recruiter> {
        payload.validate()?;
        let current = self.get_by_id(id).await?;
        ensure_owner(&current, caller)?;
        if payload.is_empty() {
            return Ok(current);
        }
        if let Some(company_id) = payload.company_id {
            self.ensure_company(company_id).await?;
        }
        let recruiter = self
            .recruiters
            .update_recruiter(id, &payload)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(recruiter_id = id, "recruiter updated");
        Ok(recruiter)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<()> {
        let current = self.get_by_id(id).await?;
        ensure_owner(&current, caller)?;
        if !self.recruiters.delete_recruiter(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(recruiter_id = id, "recruiter deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::{Company, Industry};
    use crate::models::user::Role;
    use crate::repositories::{MockCompanyRepository, MockRecruiterRepository};
    use crate::utils::time::now;

    fn caller(id: i64) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            password_hash: String::new(),
            role: Role::Recruiter,
            created_at: now(),
        }
    }

    fn profile(id: i64, user_id: i64) -> Recruiter {
        Recruiter {
            id,
            user_id,
            first_name: "Rita".into(),
            last_name: "Rao".into(),
            company_id: 1,
            position: "Talent lead".into(),
            phone_number: "555-0101".into(),
            created_at: now(),
            updated_at: now(),
        }
    }

    #[tokio::test]
    async fn missing_company_is_not_found() {
        let mut companies = MockCompanyRepository::new();
        companies.expect_get_company().returning(|_| Ok(None));
        let mut recruiters = MockRecruiterRepository::new();
        recruiters.expect_create_recruiter().never();

        let service = RecruiterService::new(Arc::new(recruiters), Arc::new(companies));
        let err = service
            .create(&caller(1), CreateRecruiterPayload {
                first_name: "Rita".into(),
                last_name: "Rao".into(),
                company_id: 77,
                position: "Talent lead".into(),
                phone_number: "555-0101".into(),
            })
            .await
            .unwrap_err();
        match err {
            Error::NotFound(msg) => assert!(msg.contains("Company 77")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn only_the_owner_may_edit_or_delete() {
        let mut recruiters = MockRecruiterRepository::new();
        recruiters
            .expect_get_recruiter()
            .returning(|id| Ok(Some(profile(id, 10))));
        recruiters.expect_update_recruiter().never();
        recruiters.expect_delete_recruiter().never();

        let service = RecruiterService::new(Arc::new(recruiters), Arc::new(MockCompanyRepository::new()));
        let patch = UpdateRecruiterPayload {
            position: Some("Head of talent".into()),
            ..Default::default()
        };
        assert!(matches!(
            service.update(&caller(11), 5, patch).await,
            Err(Error::Forbidden(_))
        ));
        assert!(matches!(service.delete(&caller(11), 5).await, Err(Error::Forbidden(_))));
    }

    #[tokio::test]
    async fn second_profile_for_a_user_conflicts() {
        let mut recruiters = MockRecruiterRepository::new();
        recruiters
            .expect_find_recruiter_by_user()
            .returning(|user_id| Ok(Some(profile(3, user_id))));
        recruiters.expect_create_recruiter().never();
        let mut companies = MockCompanyRepository::new();
        companies.expect_get_company().returning(|id| {
            Ok(Some(Company {
                id,
                email: "hr@acme.test".into(),
                name: "Acme".into(),
                industry: Industry::Finance,
                location: "Pune".into(),
                description: "Widgets".into(),
                website: "https://acme.test".into(),
                created_at: now(),
                updated_at: now(),
            }))
        });

        let service = RecruiterService::new(Arc::new(recruiters), Arc::new(companies));
        let err = service
            .create(&caller(4), CreateRecruiterPayload {
                first_name: "Rita".into(),
                last_name: "Rao".into(),
                company_id: 1,
                position: "Talent lead".into(),
                phone_number: "555-0101".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }
}
