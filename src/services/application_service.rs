use std::sync::Arc;

use validator::Validate;

use crate::dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload};
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::user::{Role, User};
use crate::repositories::{
    ApplicationRepository, ApplicationScope, ListingRepository, Page, PageRequest,
    RecruiterRepository, SeekerRepository,
};

#[derive(Clone)]
pub struct ApplicationService {
    applications: Arc<dyn ApplicationRepository>,
    listings: Arc<dyn ListingRepository>,
    seekers: Arc<dyn SeekerRepository>,
    recruiters: Arc<dyn RecruiterRepository>,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Application {} not found", id))
}

fn already_applied(listing_id: i64, seeker_id: i64) -> Error {
    Error::Conflict(format!(
        "Seeker {} has already applied to listing {}",
        seeker_id, listing_id
    ))
}

impl ApplicationService {
    pub fn new(
        applications: Arc<dyn ApplicationRepository>,
        listings: Arc<dyn ListingRepository>,
        seekers: Arc<dyn SeekerRepository>,
        recruiters: Arc<dyn RecruiterRepository>,
    ) -> Self {
        Self {
            applications,
            listings,
            seekers,
            recruiters,
        }
    }

    async fn ensure_listing(&self, listing_id: i64) -> Result<()> {
        if self.listings.get_listing(listing_id).await?.is_none() {
            return Err(Error::NotFound(format!("Listing {} not found", listing_id)));
        }
        Ok(())
    }

    async fn caller_seeker_id(&self, caller: &User) -> Result<Option<i64>> {
        Ok(self
            .seekers
            .find_seeker_by_user(caller.id)
            .await?
            .map(|seeker| seeker.id))
    }

    /// The applicant, or a recruiter of the company behind the listing.
    async fn may_manage(&self, caller: &User, application: &Application) -> Result<bool> {
        if self.caller_seeker_id(caller).await? == Some(application.seeker_id) {
            return Ok(true);
        }
        let Some(recruiter) = self.recruiters.find_recruiter_by_user(caller.id).await? else {
            return Ok(false);
        };
        let listing = self.listings.get_listing(application.listing_id).await?;
        Ok(listing.is_some_and(|listing| listing.company_id == recruiter.company_id))
    }

    pub async fn create(&self, caller: &User, payload: CreateApplicationPayload) -> Result<Application> {
        payload.validate()?;
        let seeker_id = self.caller_seeker_id(caller).await?.ok_or_else(|| {
            Error::NotFound("Job seeker profile not found for this user".to_string())
        })?;
        if payload.seeker_id.is_some_and(|requested| requested != seeker_id) {
            tracing::warn!(user_id = caller.id, "application submitted for another seeker");
            return Err(Error::Forbidden(
                "Cannot apply on behalf of another seeker".to_string(),
            ));
        }
        self.ensure_listing(payload.listing_id).await?;
        if self
            .applications
            .find_application(payload.listing_id, seeker_id)
            .await?
            .is_some()
        {
            tracing::warn!(listing_id = payload.listing_id, seeker_id, "duplicate application");
            return Err(already_applied(payload.listing_id, seeker_id));
        }
        let application = self.applications.create_application(seeker_id, &payload).await?;
        tracing::info!(
            application_id = application.id,
            listing_id = application.listing_id,
            seeker_id = application.seeker_id,
            "application created"
        );
        Ok(application)
    }

    /// Seekers see their own applications; recruiters see those sent to
    /// their company's listings. Callers without a profile get an empty page.
    pub async fn list(&self, caller: &User, page: PageRequest) -> Result<Page<Application>> {
        let scope = match caller.role {
            Role::JobSeeker => self.caller_seeker_id(caller).await?.map(ApplicationScope::Seeker),
            Role::Recruiter => self
                .recruiters
                .find_recruiter_by_user(caller.id)
                .await?
                .map(|recruiter| ApplicationScope::Company(recruiter.company_id)),
        };
        match scope {
            Some(scope) => self.applications.list_applications(scope, page).await,
            None => Ok(Page::new(Vec::new(), 0, page)),
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Application> {
        self.applications
            .get_application(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn update(
        &self,
        caller: &User,
        id: i64,
        payload: UpdateApplicationPayload,
    ) -> Result<Application> {
        payload.validate()?;
        let current = self.get_by_id(id).await?;
        if !self.may_manage(caller, &current).await? {
            tracing::warn!(application_id = id, user_id = caller.id, "application update refused");
            return Err(Error::Forbidden(
                "You are not authorized to update this application".to_string(),
            ));
        }
        if payload.is_empty() {
            return Ok(current);
        }
        if payload.seeker_id.is_some_and(|seeker_id| seeker_id != current.seeker_id) {
            return Err(Error::Forbidden(
                "An application cannot be moved to another seeker".to_string(),
            ));
        }
        if let Some(listing_id) = payload.listing_id {
            self.ensure_listing(listing_id).await?;
        }

        let listing_id = payload.listing_id.unwrap_or(current.listing_id);
        if let Some(existing) = self
            .applications
            .find_application(listing_id, current.seeker_id)
            .await?
        {
            if existing.id != id {
                return Err(already_applied(listing_id, current.seeker_id));
            }
        }

        let application = self
            .applications
            .update_application(id, &payload)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(application_id = id, status = ?application.status, "application updated");
        Ok(application)
    }

    pub async fn delete(&self, caller: &User, id: i64) -> Result<()> {
        let current = self.get_by_id(id).await?;
        if self.caller_seeker_id(caller).await? != Some(current.seeker_id) {
            tracing::warn!(application_id = id, user_id = caller.id, "application delete refused");
            return Err(Error::Forbidden(
                "Cannot delete another user's application".to_string(),
            ));
        }
        if !self.applications.delete_application(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(application_id = id, "application deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;
    use crate::models::seeker::Seeker;
    use crate::repositories::{
        MockApplicationRepository, MockListingRepository, MockRecruiterRepository,
        MockSeekerRepository,
    };
    use crate::utils::time::{now, today};

    fn caller(id: i64, role: Role) -> User {
        User {
            id,
            email: format!("user{}@example.com", id),
            password_hash: String::new(),
            role,
            created_at: now(),
        }
    }

    fn seeker(id: i64, user_id: i64) -> Seeker {
        Seeker {
            id,
            user_id,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            desired_job_title: "Engineer".into(),
            phone_number: "555-0100".into(),
            location: "London".into(),
            current_salary: 10,
            past_experience: None,
            skill_set: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn service(
        applications: MockApplicationRepository,
        listings: MockListingRepository,
        seekers: MockSeekerRepository,
        recruiters: MockRecruiterRepository,
    ) -> ApplicationService {
        ApplicationService::new(
            Arc::new(applications),
            Arc::new(listings),
            Arc::new(seekers),
            Arc::new(recruiters),
        )
    }

    #[tokio::test]
    async fn applying_for_someone_else_is_forbidden() {
        let mut seekers = MockSeekerRepository::new();
        seekers
            .expect_find_seeker_by_user()
            .returning(|user_id| Ok(Some(seeker(7, user_id))));
        let mut applications = MockApplicationRepository::new();
        applications.expect_create_application().never();

        let service = service(
            applications,
            MockListingRepository::new(),
            seekers,
            MockRecruiterRepository::new(),
        );
        let err = service
            .create(
                &caller(1, Role::JobSeeker),
                CreateApplicationPayload {
                    listing_id: 3,
                    seeker_id: Some(99),
                    status: ApplicationStatus::Pending,
                    applied_date: today(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn seeker_without_profile_lists_nothing() {
        let mut seekers = MockSeekerRepository::new();
        seekers.expect_find_seeker_by_user().returning(|_| Ok(None));
        let mut applications = MockApplicationRepository::new();
        applications.expect_list_applications().never();

        let service = service(
            applications,
            MockListingRepository::new(),
            seekers,
            MockRecruiterRepository::new(),
        );
        let page = service
            .list(&caller(1, Role::JobSeeker), PageRequest::default())
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn seeker_list_is_scoped_to_their_profile() {
        let mut seekers = MockSeekerRepository::new();
        seekers
            .expect_find_seeker_by_user()
            .returning(|user_id| Ok(Some(seeker(7, user_id))));
        let mut applications = MockApplicationRepository::new();
        applications
            .expect_list_applications()
            .withf(|scope, _| *scope == ApplicationScope::Seeker(7))
            .returning(|_, page| Ok(Page::new(Vec::new(), 0, page)));

        let service = service(
            applications,
            MockListingRepository::new(),
            seekers,
            MockRecruiterRepository::new(),
        );
        service
            .list(&caller(1, Role::JobSeeker), PageRequest::default())
            .await
            .unwrap();
    }
}
