//! Storage contracts, one trait per entity.
//!
//! Services only ever talk to these traits. [`postgres::PgStore`] is the
//! production backend; [`memory::MemoryStore`] keeps everything in process
//! and backs the test suite and `STORAGE_BACKEND=memory`.
//!
//! Every `list` returns records in creation order (ascending id) so that
//! consecutive `skip`/`limit` windows never overlap or skip records.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload};
use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::dto::listing_dto::{CreateListingPayload, UpdateListingPayload};
use crate::dto::pagination::{DEFAULT_LIMIT, DEFAULT_SKIP};
use crate::dto::recipe_dto::{CreateRecipePayload, UpdateRecipePayload};
use crate::dto::recruiter_dto::{CreateRecruiterPayload, UpdateRecruiterPayload};
use crate::dto::seeker_dto::{CreateSeekerPayload, UpdateSeekerPayload};
use crate::error::Result;
use crate::models::{
    application::Application,
    company::Company,
    listing::{EmploymentType, Listing},
    recipe::Recipe,
    recruiter::Recruiter,
    seeker::Seeker,
    user::{Role, User},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(
    RecipePage = Page<Recipe>,
    CompanyPage = Page<Company>,
    RecruiterPage = Page<Recruiter>,
    ListingPage = Page<Listing>,
    SeekerPage = Page<Seeker>,
    ApplicationPage = Page<Application>
)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            skip: request.skip,
            limit: request.limit,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilters {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the work-mode label.
    pub location: Option<String>,
    pub employment_type: Option<EmploymentType>,
}

/// Which applications a caller may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationScope {
    /// Submitted by one seeker profile.
    Seeker(i64),
    /// Sent to any listing of one company.
    Company(i64),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, email: &str, password_hash: &str, role: Role) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
    /// Fails with a conflict while a recruiter or seeker profile belongs to the user.
    async fn delete_user(&self, id: i64) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn create_recipe(&self, payload: &CreateRecipePayload) -> Result<Recipe>;
    async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>>;
    async fn list_recipes(&self, page: PageRequest) -> Result<Page<Recipe>>;
    async fn update_recipe(&self, id: i64, payload: &UpdateRecipePayload) -> Result<Option<Recipe>>;
    async fn delete_recipe(&self, id: i64) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create_company(&self, payload: &CreateCompanyPayload) -> Result<Company>;
    async fn get_company(&self, id: i64) -> Result<Option<Company>>;
    async fn find_company_by_email(&self, email: &str) -> Result<Option<Company>>;
    async fn list_companies(&self, page: PageRequest) -> Result<Page<Company>>;
    async fn update_company(&self, id: i64, payload: &UpdateCompanyPayload) -> Result<Option<Company>>;
    /// True while any recruiter or listing still references the company.
    async fn company_has_dependents(&self, id: i64) -> Result<bool>;
    async fn delete_company(&self, id: i64) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecruiterRepository: Send + Sync {
    async fn create_recruiter(&self, user_id: i64, payload: &CreateRecruiterPayload) -> Result<Recruiter>;
    async fn get_recruiter(&self, id: i64) -> Result<Option<Recruiter>>;
    async fn find_recruiter_by_user(&self, user_id: i64) -> Result<Option<Recruiter>>;
    async fn list_recruiters(&self, page: PageRequest) -> Result<Page<Recruiter>>;
    async fn update_recruiter(&self, id: i64, payload: &UpdateRecruiterPayload) -> Result<Option<Recruiter>>;
    async fn delete_recruiter(&self, id: i64) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn create_listing(&self, payload: &CreateListingPayload) -> Result<Listing>;
    async fn get_listing(&self, id: i64) -> Result<Option<Listing>>;
    async fn list_listings(&self, page: PageRequest) -> Result<Page<Listing>>;
    async fn search_listings(&self, filters: &ListingFilters, page: PageRequest) -> Result<Page<Listing>>;
    async fn update_listing(&self, id: i64, payload: &UpdateListingPayload) -> Result<Option<Listing>>;
    /// True while any application still references the listing.
    async fn listing_has_dependents(&self, id: i64) -> Result<bool>;
    async fn delete_listing(&self, id: i64) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeekerRepository: Send + Sync {
    async fn create_seeker(&self, user_id: i64, payload: &CreateSeekerPayload) -> Result<Seeker>;
    async fn get_seeker(&self, id: i64) -> Result<Option<Seeker>>;
    async fn find_seeker_by_user(&self, user_id: i64) -> Result<Option<Seeker>>;
    async fn list_seekers(&self, page: PageRequest) -> Result<Page<Seeker>>;
    async fn update_seeker(&self, id: i64, payload: &UpdateSeekerPayload) -> Result<Option<Seeker>>;
    /// True while any application still references the seeker.
    async fn seeker_has_dependents(&self, id: i64) -> Result<bool>;
    async fn delete_seeker(&self, id: i64) -> Result<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    async fn create_application(
        &self,
        seeker_id: i64,
        payload: &CreateApplicationPayload,
    ) -> Result<Application>;
    async fn get_application(&self, id: i64) -> Result<Option<Application>>;
    async fn find_application(&self, listing_id: i64, seeker_id: i64) -> Result<Option<Application>>;
    async fn list_applications(
        &self,
        scope: ApplicationScope,
        page: PageRequest,
    ) -> Result<Page<Application>>;
    async fn update_application(
        &self,
        id: i64,
        payload: &UpdateApplicationPayload,
    ) -> Result<Option<Application>>;
    async fn delete_application(&self, id: i64) -> Result<bool>;
}

/// Everything a full backend provides; implemented for any type that
/// implements each entity repository.
pub trait Store:
    UserRepository
    + RecipeRepository
    + CompanyRepository
    + RecruiterRepository
    + ListingRepository
    + SeekerRepository
    + ApplicationRepository
    + 'static
{
}

impl<T> Store for T where
    T: UserRepository
        + RecipeRepository
        + CompanyRepository
        + RecruiterRepository
        + ListingRepository
        + SeekerRepository
        + ApplicationRepository
        + 'static
{
}
