pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod router;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::repositories::{memory::MemoryStore, postgres::PgStore, Store};
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    company_service::CompanyService, listing_service::ListingService,
    recipe_service::RecipeService, recruiter_service::RecruiterService,
    seeker_service::SeekerService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub recipe_service: RecipeService,
    pub company_service: CompanyService,
    pub recruiter_service: RecruiterService,
    pub listing_service: ListingService,
    pub seeker_service: SeekerService,
    pub application_service: ApplicationService,
}

impl AppState {
    pub fn new<S: Store>(config: Arc<Config>, store: Arc<S>) -> Self {
        let auth_service = AuthService::new(store.clone(), store.clone(), store.clone(), &config);
        let recipe_service = RecipeService::new(store.clone());
        let company_service = CompanyService::new(store.clone());
        let recruiter_service = RecruiterService::new(store.clone(), store.clone());
        let listing_service = ListingService::new(store.clone(), store.clone());
        let seeker_service = SeekerService::new(store.clone());
        let application_service =
            ApplicationService::new(store.clone(), store.clone(), store.clone(), store);

        Self {
            config,
            auth_service,
            recipe_service,
            company_service,
            recruiter_service,
            listing_service,
            seeker_service,
            application_service,
        }
    }

    pub fn with_postgres(config: Arc<Config>, pool: PgPool) -> Self {
        Self::new(config, Arc::new(PgStore::new(pool)))
    }

    pub fn in_memory(config: Arc<Config>) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }
}
