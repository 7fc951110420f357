use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    ApplicationRepository, ApplicationScope, CompanyRepository, ListingFilters, ListingRepository, Page,
    PageRequest, RecipeRepository, RecruiterRepository, SeekerRepository, UserRepository,
};
use crate::dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload};
use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::dto::listing_dto::{CreateListingPayload, UpdateListingPayload};
use crate::dto::recipe_dto::{CreateRecipePayload, UpdateRecipePayload};
use crate::dto::recruiter_dto::{CreateRecruiterPayload, UpdateRecruiterPayload};
use crate::dto::seeker_dto::{CreateSeekerPayload, UpdateSeekerPayload};
use crate::error::{Error, Result};
use crate::models::{
    application::Application, company::Company, listing::Listing, recipe::Recipe,
    recruiter::Recruiter, seeker::Seeker, user::{Role, User},
};
use crate::utils::time::now;

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        self.next_id += 1;
        let row = build(self.next_id);
        self.rows.insert(self.next_id, row.clone());
        row
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn page(&self, request: PageRequest) -> Page<T> {
        paginate(self.rows.values(), request)
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

fn paginate<'a, T: Clone + 'a>(rows: impl Iterator<Item = &'a T>, request: PageRequest) -> Page<T> {
    let matching: Vec<&T> = rows.collect();
    let total = matching.len() as i64;
    let skip = usize::try_from(request.skip).unwrap_or(0);
    let limit = usize::try_from(request.limit).unwrap_or(0);
    let items = matching.into_iter().skip(skip).take(limit).cloned().collect();
    Page::new(items, total, request)
}

fn set<T>(slot: &mut T, value: &Option<T>) -> bool
where
    T: Clone,
{
    match value {
        Some(v) => {
            *slot = v.clone();
            true
        }
        None => false,
    }
}

fn relationship_violation() -> Error {
    Error::Conflict("Operation violates a relationship between records".to_string())
}

fn unique_violation() -> Error {
    Error::Conflict("A record with the same unique value already exists".to_string())
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    recipes: Table<Recipe>,
    companies: Table<Company>,
    recruiters: Table<Recruiter>,
    listings: Table<Listing>,
    seekers: Table<Seeker>,
    applications: Table<Application>,
}

/// In-process store with the same constraints as the SQL schema: unique
/// emails, unique (listing, seeker) pairs, and restrict-on-delete for
/// every foreign key.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str, role: Role) -> Result<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.rows.values().any(|u| u.email == email) {
            return Err(unique_violation());
        }
        Ok(tables.users.insert_with(|id| User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: now(),
        }))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.tables.lock().await.users.get(id))
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        if tables.recruiters.rows.values().any(|r| r.user_id == id)
            || tables.seekers.rows.values().any(|s| s.user_id == id)
        {
            return Err(relationship_violation());
        }
        Ok(tables.users.remove(id))
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn create_recipe(&self, payload: &CreateRecipePayload) -> Result<Recipe> {
        let mut tables = self.tables.lock().await;
        let created_at = now();
        Ok(tables.recipes.insert_with(|id| Recipe {
            id,
            name: payload.name.clone(),
            category: payload.category,
            method: payload.method.clone(),
            prep_time_minutes: payload.prep_time_minutes,
            created_at,
            updated_at: created_at,
        }))
    }

    async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>> {
        Ok(self.tables.lock().await.recipes.get(id))
    }

    async fn list_recipes(&self, page: PageRequest) -> Result<Page<Recipe>> {
        Ok(self.tables.lock().await.recipes.page(page))
    }

    async fn update_recipe(&self, id: i64, payload: &UpdateRecipePayload) -> Result<Option<Recipe>> {
        let mut tables = self.tables.lock().await;
        let Some(recipe) = tables.recipes.rows.get_mut(&id) else {
            return Ok(None);
        };
        let mut changed = set(&mut recipe.name, &payload.name);
        changed |= set(&mut recipe.category, &payload.category);
        changed |= set(&mut recipe.method, &payload.method);
        changed |= set(&mut recipe.prep_time_minutes, &payload.prep_time_minutes);
        if changed {
            recipe.updated_at = now();
        }
        Ok(Some(recipe.clone()))
    }

    async fn delete_recipe(&self, id: i64) -> Result<bool> {
        Ok(self.tables.lock().await.recipes.remove(id))
    }
}

#[async_trait]
impl CompanyRepository for MemoryStore {
    async fn create_company(&self, payload: &CreateCompanyPayload) -> Result<Company> {
        let mut tables = self.tables.lock().await;
        if tables.companies.rows.values().any(|c| c.email == payload.email) {
            return Err(unique_violation());
        }
        let created_at = now();
        Ok(tables.companies.insert_with(|id| Company {
            id,
            email: payload.email.clone(),
            name: payload.name.clone(),
            industry: payload.industry,
            location: payload.location.clone(),
            description: payload.description.clone(),
            website: payload.website.clone(),
            created_at,
            updated_at: created_at,
        }))
    }

    async fn get_company(&self, id: i64) -> Result<Option<Company>> {
        Ok(self.tables.lock().await.companies.get(id))
    }

    async fn find_company_by_email(&self, email: &str) -> Result<Option<Company>> {
        let tables = self.tables.lock().await;
        Ok(tables.companies.rows.values().find(|c| c.email == email).cloned())
    }

    async fn list_companies(&self, page: PageRequest) -> Result<Page<Company>> {
        Ok(self.tables.lock().await.companies.page(page))
    }

    async fn update_company(&self, id: i64, payload: &UpdateCompanyPayload) -> Result<Option<Company>> {
        let mut tables = self.tables.lock().await;
        if let Some(email) = &payload.email {
            if tables.companies.rows.values().any(|c| c.id != id && &c.email == email) {
                return Err(unique_violation());
            }
        }
        let Some(company) = tables.companies.rows.get_mut(&id) else {
            return Ok(None);
        };
        let mut changed = set(&mut company.email, &payload.email);
        changed |= set(&mut company.name, &payload.name);
        changed |= set(&mut company.industry, &payload.industry);
        changed |= set(&mut company.location, &payload.location);
        changed |= set(&mut company.description, &payload.description);
        changed |= set(&mut company.website, &payload.website);
        if changed {
            company.updated_at = now();
        }
        Ok(Some(company.clone()))
    }

    async fn company_has_dependents(&self, id: i64) -> Result<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.recruiters.rows.values().any(|r| r.company_id == id)
            || tables.listings.rows.values().any(|l| l.company_id == id))
    }

    async fn delete_company(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        if tables.recruiters.rows.values().any(|r| r.company_id == id)
            || tables.listings.rows.values().any(|l| l.company_id == id)
        {
            return Err(relationship_violation());
        }
        Ok(tables.companies.remove(id))
    }
}

#[async_trait]
impl RecruiterRepository for MemoryStore {
    async fn create_recruiter(&self, user_id: i64, payload: &CreateRecruiterPayload) -> Result<Recruiter> {
        let mut tables = self.tables.lock().await;
        if !tables.companies.contains(payload.company_id) || !tables.users.contains(user_id) {
            return Err(relationship_violation());
        }
        if tables.recruiters.rows.values().any(|r| r.user_id == user_id) {
            return Err(unique_violation());
        }
        let created_at = now();
        Ok(tables.recruiters.insert_with(|id| Recruiter {
            id,
            user_id,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            company_id: payload.company_id,
            position: payload.position.clone(),
            phone_number: payload.phone_number.clone(),
            created_at,
            updated_at: created_at,
        }))
    }

    async fn get_recruiter(&self, id: i64) -> Result<Option<Recruiter>> {
        Ok(self.tables.lock().await.recruiters.get(id))
    }

    async fn find_recruiter_by_user(&self, user_id: i64) -> Result<Option<Recruiter>> {
        let tables = self.tables.lock().await;
        Ok(tables.recruiters.rows.values().find(|r| r.user_id == user_id).cloned())
    }

    async fn list_recruiters(&self, page: PageRequest) -> Result<Page<Recruiter>> {
        Ok(self.tables.lock().await.recruiters.page(page))
    }

    async fn update_recruiter(
        &self,
        id: i64,
        payload: &UpdateRecruiterPayload,
    ) -> Result<Option<Recruiter>> {
        let mut tables = self.tables.lock().await;
        if let Some(company_id) = payload.company_id {
            if !tables.companies.contains(company_id) {
                return Err(relationship_violation());
            }
        }
        let Some(recruiter) = tables.recruiters.rows.get_mut(&id) else {
            return Ok(None);
        };
        let mut changed = set(&mut recruiter.first_name, &payload.first_name);
        changed |= set(&mut recruiter.last_name, &payload.last_name);
        changed |= set(&mut recruiter.company_id, &payload.company_id);
        changed |= set(&mut recruiter.position, &payload.position);
        changed |= set(&mut recruiter.phone_number, &payload.phone_number);
        if changed {
            recruiter.updated_at = now();
        }
        Ok(Some(recruiter.clone()))
    }

    async fn delete_recruiter(&self, id: i64) -> Result<bool> {
        Ok(self.tables.lock().await.recruiters.remove(id))
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn create_listing(&self, payload: &CreateListingPayload) -> Result<Listing> {
        let mut tables = self.tables.lock().await;
        if !tables.companies.contains(payload.company_id) {
            return Err(relationship_violation());
        }
        let created_at = now();
        Ok(tables.listings.insert_with(|id| Listing {
            id,
            company_id: payload.company_id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            location: payload.location,
            salary_range: payload.salary_range,
            employment_type: payload.employment_type,
            posted_date: payload.posted_date,
            application_deadline: payload.application_deadline,
            status: payload.status,
            created_at,
            updated_at: created_at,
        }))
    }

    async fn get_listing(&self, id: i64) -> Result<Option<Listing>> {
        Ok(self.tables.lock().await.listings.get(id))
    }

    async fn list_listings(&self, page: PageRequest) -> Result<Page<Listing>> {
        Ok(self.tables.lock().await.listings.page(page))
    }

    async fn search_listings(&self, filters: &ListingFilters, page: PageRequest) -> Result<Page<Listing>> {
        let title = filters.title.as_ref().map(|t| t.to_lowercase());
        let location = filters.location.as_ref().map(|l| l.to_lowercase());
        let tables = self.tables.lock().await;
        let matching = tables.listings.rows.values().filter(|listing| {
            title
                .as_ref()
                .map_or(true, |t| listing.title.to_lowercase().contains(t))
                && location
                    .as_ref()
                    .map_or(true, |l| listing.location.as_str().to_lowercase().contains(l))
                && filters
                    .employment_type
                    .map_or(true, |kind| listing.employment_type == kind)
        });
        Ok(paginate(matching, page))
    }

    async fn update_listing(&self, id: i64, payload: &UpdateListingPayload) -> Result<Option<Listing>> {
        let mut tables = self.tables.lock().await;
        if let Some(company_id) = payload.company_id {
            if !tables.companies.contains(company_id) {
                return Err(relationship_violation());
            }
        }
        let Some(listing) = tables.listings.rows.get_mut(&id) else {
            return Ok(None);
        };
        let mut changed = set(&mut listing.company_id, &payload.company_id);
        changed |= set(&mut listing.title, &payload.title);
        changed |= set(&mut listing.description, &payload.description);
        changed |= set(&mut listing.location, &payload.location);
        changed |= set(&mut listing.salary_range, &payload.salary_range);
        changed |= set(&mut listing.employment_type, &payload.employment_type);
        changed |= set(&mut listing.posted_date, &payload.posted_date);
        changed |= set(&mut listing.application_deadline, &payload.application_deadline);
        changed |= set(&mut listing.status, &payload.status);
        if changed {
            listing.updated_at = now();
        }
        Ok(Some(listing.clone()))
    }

    async fn listing_has_dependents(&self, id: i64) -> Result<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.applications.rows.values().any(|a| a.listing_id == id))
    }

    async fn delete_listing(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        if tables.applications.rows.values().any(|a| a.listing_id == id) {
            return Err(relationship_violation());
        }
        Ok(tables.listings.remove(id))
    }
}

#[async_trait]
impl SeekerRepository for MemoryStore {
    async fn create_seeker(&self, user_id: i64, payload: &CreateSeekerPayload) -> Result<Seeker> {
        let mut tables = self.tables.lock().await;
        if !tables.users.contains(user_id) {
            return Err(relationship_violation());
        }
        if tables.seekers.rows.values().any(|s| s.user_id == user_id) {
            return Err(unique_violation());
        }
        let created_at = now();
        Ok(tables.seekers.insert_with(|id| Seeker {
            id,
            user_id,
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            desired_job_title: payload.desired_job_title.clone(),
            phone_number: payload.phone_number.clone(),
            location: payload.location.clone(),
            current_salary: payload.current_salary,
            past_experience: payload.past_experience.clone(),
            skill_set: payload.skill_set.clone(),
            created_at,
            updated_at: created_at,
        }))
    }

    async fn get_seeker(&self, id: i64) -> Result<Option<Seeker>> {
        Ok(self.tables.lock().await.seekers.get(id))
    }

    async fn find_seeker_by_user(&self, user_id: i64) -> Result<Option<Seeker>> {
        let tables = self.tables.lock().await;
        Ok(tables.seekers.rows.values().find(|s| s.user_id == user_id).cloned())
    }

    async fn list_seekers(&self, page: PageRequest) -> Result<Page<Seeker>> {
        Ok(self.tables.lock().await.seekers.page(page))
    }

    async fn update_seeker(&self, id: i64, payload: &UpdateSeekerPayload) -> Result<Option<Seeker>> {
        let mut tables = self.tables.lock().await;
        let Some(seeker) = tables.seekers.rows.get_mut(&id) else {
            return Ok(None);
        };
        let mut changed = set(&mut seeker.first_name, &payload.first_name);
        changed |= set(&mut seeker.last_name, &payload.last_name);
        changed |= set(&mut seeker.desired_job_title, &payload.desired_job_title);
        changed |= set(&mut seeker.phone_number, &payload.phone_number);
        changed |= set(&mut seeker.location, &payload.location);
        changed |= set(&mut seeker.current_salary, &payload.current_salary);
        changed |= set(&mut seeker.past_experience, &payload.past_experience);
        changed |= set(&mut seeker.skill_set, &payload.skill_set);
        if changed {
            seeker.updated_at = now();
        }
        Ok(Some(seeker.clone()))
    }

    async fn seeker_has_dependents(&self, id: i64) -> Result<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.applications.rows.values().any(|a| a.seeker_id == id))
    }

    async fn delete_seeker(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        if tables.applications.rows.values().any(|a| a.seeker_id == id) {
            return Err(relationship_violation());
        }
        Ok(tables.seekers.remove(id))
    }
}

#[async_trait]
impl ApplicationRepository for MemoryStore {
    async fn create_application(
        &self,
        seeker_id: i64,
        payload: &CreateApplicationPayload,
    ) -> Result<Application> {
        let mut tables = self.tables.lock().await;
        if !tables.listings.contains(payload.listing_id) || !tables.seekers.contains(seeker_id) {
            return Err(relationship_violation());
        }
        if tables
            .applications
            .rows
            .values()
            .any(|a| a.listing_id == payload.listing_id && a.seeker_id == seeker_id)
        {
            return Err(unique_violation());
        }
        let created_at = now();
        Ok(tables.applications.insert_with(|id| Application {
            id,
            listing_id: payload.listing_id,
            seeker_id,
            status: payload.status,
            applied_date: payload.applied_date,
            created_at,
            updated_at: created_at,
        }))
    }

    async fn get_application(&self, id: i64) -> Result<Option<Application>> {
        Ok(self.tables.lock().await.applications.get(id))
    }

    async fn find_application(&self, listing_id: i64, seeker_id: i64) -> Result<Option<Application>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .applications
            .rows
            .values()
            .find(|a| a.listing_id == listing_id && a.seeker_id == seeker_id)
            .cloned())
    }

    async fn list_applications(
        &self,
        scope: ApplicationScope,
        page: PageRequest,
    ) -> Result<Page<Application>> {
        let tables = self.tables.lock().await;
        let visible = tables.applications.rows.values().filter(|a| match scope {
            ApplicationScope::Seeker(seeker_id) => a.seeker_id == seeker_id,
            ApplicationScope::Company(company_id) => tables
                .listings
                .rows
                .get(&a.listing_id)
                .is_some_and(|l| l.company_id == company_id),
        });
        Ok(paginate(visible, page))
    }

    async fn update_application(
        &self,
        id: i64,
        payload: &UpdateApplicationPayload,
    ) -> Result<Option<Application>> {
        let mut tables = self.tables.lock().await;
        if payload.listing_id.is_some_and(|listing_id| !tables.listings.contains(listing_id))
            || payload.seeker_id.is_some_and(|seeker_id| !tables.seekers.contains(seeker_id))
        {
            return Err(relationship_violation());
        }
        let Some(current) = tables.applications.get(id) else {
            return Ok(None);
        };
        let listing_id = payload.listing_id.unwrap_or(current.listing_id);
        let seeker_id = payload.seeker_id.unwrap_or(current.seeker_id);
        if tables
            .applications
            .rows
            .values()
            .any(|a| a.id != id && a.listing_id == listing_id && a.seeker_id == seeker_id)
        {
            return Err(unique_violation());
        }
        let Some(application) = tables.applications.rows.get_mut(&id) else {
            return Ok(None);
        };
        let mut changed = set(&mut application.listing_id, &payload.listing_id);
        changed |= set(&mut application.seeker_id, &payload.seeker_id);
        changed |= set(&mut application.status, &payload.status);
        changed |= set(&mut application.applied_date, &payload.applied_date);
        if changed {
            application.updated_at = now();
        }
        Ok(Some(application.clone()))
    }

    async fn delete_application(&self, id: i64) -> Result<bool> {
        Ok(self.tables.lock().await.applications.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::Industry;
    use crate::models::recipe::RecipeCategory;

    fn recipe(name: &str) -> CreateRecipePayload {
        CreateRecipePayload {
            name: name.to_string(),
            category: RecipeCategory::Dinner,
            method: "Boil".to_string(),
            prep_time_minutes: 10,
        }
    }

    fn company(email: &str) -> CreateCompanyPayload {
        CreateCompanyPayload {
            email: email.to_string(),
            name: "Acme".to_string(),
            industry: Industry::Finance,
            location: "Pune".to_string(),
            description: "Widgets".to_string(),
            website: "https://acme.test".to_string(),
        }
    }

    #[tokio::test]
    async fn ids_increase_in_creation_order() {
        let store = MemoryStore::new();
        let first = store.create_recipe(&recipe("a")).await.unwrap();
        let second = store.create_recipe(&recipe("b")).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn pages_are_disjoint_and_cover_everything() {
        let store = MemoryStore::new();
        for i in 0..7 {
            store.create_recipe(&recipe(&format!("r{}", i))).await.unwrap();
        }
        let first = store
            .list_recipes(PageRequest { skip: 0, limit: 4 })
            .await
            .unwrap();
        let second = store
            .list_recipes(PageRequest { skip: 4, limit: 4 })
            .await
            .unwrap();
        assert_eq!(first.total, 7);
        assert_eq!(first.items.len(), 4);
        assert_eq!(second.items.len(), 3);
        let mut ids: Vec<i64> = first.items.iter().chain(&second.items).map(|r| r.id).collect();
        let sorted = {
            let mut s = ids.clone();
            s.sort();
            s
        };
        assert_eq!(ids, sorted);
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[tokio::test]
    async fn empty_update_leaves_timestamps_alone() {
        let store = MemoryStore::new();
        let created = store.create_recipe(&recipe("soup")).await.unwrap();
        let updated = store
            .update_recipe(created.id, &UpdateRecipePayload::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created, updated);
    }

    #[tokio::test]
    async fn duplicate_company_email_conflicts() {
        let store = MemoryStore::new();
        store.create_company(&company("hr@acme.test")).await.unwrap();
        let err = store.create_company(&company("hr@acme.test")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    fn recruiter(company_id: i64) -> CreateRecruiterPayload {
        CreateRecruiterPayload {
            first_name: "Rita".into(),
            last_name: "R".into(),
            company_id,
            position: "Lead".into(),
            phone_number: "1".into(),
        }
    }

    #[tokio::test]
    async fn company_with_recruiter_cannot_be_deleted() {
        let store = MemoryStore::new();
        let rita = store.create_user("rita@acme.test", "hash", Role::Recruiter).await.unwrap();
        let acme = store.create_company(&company("hr@acme.test")).await.unwrap();
        store.create_recruiter(rita.id, &recruiter(acme.id)).await.unwrap();
        assert!(store.company_has_dependents(acme.id).await.unwrap());
        assert!(matches!(store.delete_company(acme.id).await, Err(Error::Conflict(_))));
    }

    #[tokio::test]
    async fn one_profile_per_user_and_user_kept_while_profile_exists() {
        let store = MemoryStore::new();
        let rita = store.create_user("rita@acme.test", "hash", Role::Recruiter).await.unwrap();
        let acme = store.create_company(&company("hr@acme.test")).await.unwrap();
        let profile = store.create_recruiter(rita.id, &recruiter(acme.id)).await.unwrap();
        assert_eq!(profile.user_id, rita.id);
        assert_eq!(
            store.find_recruiter_by_user(rita.id).await.unwrap(),
            Some(profile.clone())
        );

        let again = store.create_recruiter(rita.id, &recruiter(acme.id)).await;
        assert!(matches!(again, Err(Error::Conflict(_))));
        assert!(matches!(store.delete_user(rita.id).await, Err(Error::Conflict(_))));

        assert!(store.delete_recruiter(profile.id).await.unwrap());
        assert!(store.delete_user(rita.id).await.unwrap());
    }
}
