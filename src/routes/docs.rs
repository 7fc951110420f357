use axum::{response::IntoResponse, Json};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::dto::{
    application_dto::{CreateApplicationPayload, UpdateApplicationPayload},
    auth_dto::{LoginPayload, MeResponse, RegisterPayload, TokenResponse, UserResponse},
    company_dto::{CreateCompanyPayload, UpdateCompanyPayload},
    listing_dto::{CreateListingPayload, UpdateListingPayload},
    recipe_dto::{CreateRecipePayload, UpdateRecipePayload},
    recruiter_dto::{CreateRecruiterPayload, UpdateRecruiterPayload},
    seeker_dto::{CreateSeekerPayload, UpdateSeekerPayload},
};
use crate::models::{
    application::{Application, ApplicationStatus},
    company::{Company, Industry},
    listing::{EmploymentType, Listing, ListingStatus, SalaryRange, WorkMode},
    recipe::{Recipe, RecipeCategory},
    recruiter::Recruiter,
    seeker::{ProfileCompletion, Seeker},
    user::Role,
};
use crate::repositories::{
    ApplicationPage, CompanyPage, ListingPage, RecipePage, RecruiterPage, SeekerPage,
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::health::welcome,
        super::health::health,
        super::auth::register,
        super::auth::login,
        super::auth::me,
        super::auth::delete_me,
        super::recipe::create_recipe,
        super::recipe::list_recipes,
        super::recipe::get_recipe,
        super::recipe::update_recipe,
        super::recipe::delete_recipe,
        super::company::create_company,
        super::company::list_companies,
        super::company::get_company,
        super::company::update_company,
        super::company::delete_company,
        super::recruiter::create_recruiter,
        super::recruiter::list_recruiters,
        super::recruiter::get_recruiter,
        super::recruiter::update_recruiter,
        super::recruiter::delete_recruiter,
        super::listing::create_listing,
        super::listing::list_listings,
        super::listing::search_listings,
        super::listing::get_listing,
        super::listing::update_listing,
        super::listing::delete_listing,
        super::seeker::create_seeker,
        super::seeker::list_seekers,
        super::seeker::get_seeker,
        super::seeker::get_completion,
        super::seeker::update_seeker,
        super::seeker::delete_seeker,
        super::application::create_application,
        super::application::list_applications,
        super::application::get_application,
        super::application::update_application,
        super::application::delete_application,
    ),
    components(schemas(
        RegisterPayload, LoginPayload, TokenResponse, UserResponse, MeResponse, Role,
        Recipe, RecipeCategory, CreateRecipePayload, UpdateRecipePayload, RecipePage,
        Company, Industry, CreateCompanyPayload, UpdateCompanyPayload, CompanyPage,
        Recruiter, CreateRecruiterPayload, UpdateRecruiterPayload, RecruiterPage,
        Listing, WorkMode, SalaryRange, EmploymentType, ListingStatus,
        CreateListingPayload, UpdateListingPayload, ListingPage,
        Seeker, ProfileCompletion, CreateSeekerPayload, UpdateSeekerPayload, SeekerPage,
        Application, ApplicationStatus, CreateApplicationPayload, UpdateApplicationPayload,
        ApplicationPage,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "identity", description = "Registration, login and the current user"),
        (name = "recipes", description = "Recipe catalogue"),
        (name = "companies", description = "Hiring companies"),
        (name = "recruiters", description = "Recruiters working for companies"),
        (name = "listings", description = "Job listings and search"),
        (name = "seekers", description = "Job seeker profiles"),
        (name = "applications", description = "Applications to listings"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
