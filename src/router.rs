use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::middleware::{
    auth::{require_auth, require_job_seeker, require_recruiter},
    cors::api_cors,
    rate_limit::{enforce_budget, RequestBudget},
    request_log::log_requests,
};
use crate::routes::{
    application, auth, company, docs, health, listing, recipe, recruiter, seeker,
};
use crate::AppState;

/// Registers `path` both with and without its trailing slash.
fn collection(router: Router<AppState>, path: &str, methods: MethodRouter<AppState>) -> Router<AppState> {
    let bare = path.trim_end_matches('/');
    router.route(bare, methods.clone()).route(path, methods)
}

async fn unknown_route() -> Error {
    Error::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let any_token = from_fn_with_state(state.clone(), require_auth);
    let recruiter_only = from_fn_with_state(state.clone(), require_recruiter);
    let job_seeker_only = from_fn_with_state(state.clone(), require_job_seeker);

    let mut app = Router::new()
        .route("/", get(health::welcome))
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json));

    // identity
    for prefix in ["", "/users"] {
        let login_path = if prefix.is_empty() { "/token" } else { "/users/login" };
        app = app
            .route(&format!("{}/register", prefix), post(auth::register))
            .route(login_path, post(auth::login))
            .route(
                &format!("{}/me", prefix),
                get(auth::me)
                    .delete(auth::delete_me)
                    .route_layer(any_token.clone()),
            );
    }

    // recipes: public reads, any authenticated user writes
    app = collection(
        app,
        "/recipes/",
        get(recipe::list_recipes).merge(post(recipe::create_recipe).route_layer(any_token.clone())),
    )
    .route(
        "/recipes/:id",
        get(recipe::get_recipe).merge(
            patch(recipe::update_recipe)
                .delete(recipe::delete_recipe)
                .route_layer(any_token.clone()),
        ),
    );

    // companies, recruiters, listings: public reads, recruiter writes
    app = collection(
        app,
        "/companies/",
        get(company::list_companies)
            .merge(post(company::create_company).route_layer(recruiter_only.clone())),
    )
    .route(
        "/companies/:id",
        get(company::get_company).merge(
            patch(company::update_company)
                .delete(company::delete_company)
                .route_layer(recruiter_only.clone()),
        ),
    );

    app = collection(
        app,
        "/recruiters/",
        get(recruiter::list_recruiters)
            .merge(post(recruiter::create_recruiter).route_layer(recruiter_only.clone())),
    )
    .route(
        "/recruiters/:id",
        get(recruiter::get_recruiter).merge(
            patch(recruiter::update_recruiter)
                .delete(recruiter::delete_recruiter)
                .route_layer(recruiter_only.clone()),
        ),
    );

    app = collection(
        app,
        "/listings/",
        get(listing::list_listings)
            .merge(post(listing::create_listing).route_layer(recruiter_only.clone())),
    )
    .route(
        "/listings/search",
        get(listing::search_listings).route_layer(any_token.clone()),
    )
    .route(
        "/listings/:id",
        get(listing::get_listing).merge(
            patch(listing::update_listing)
                .delete(listing::delete_listing)
                .route_layer(recruiter_only.clone()),
        ),
    );

    // seekers: public reads, job seeker writes
    app = collection(
        app,
        "/seekers/",
        get(seeker::list_seekers)
            .merge(post(seeker::create_seeker).route_layer(job_seeker_only.clone())),
    )
    .route(
        "/seekers/:id",
        get(seeker::get_seeker).merge(
            patch(seeker::update_seeker)
                .delete(seeker::delete_seeker)
                .route_layer(job_seeker_only.clone()),
        ),
    )
    .route(
        "/seekers/:id/completion",
        get(seeker::get_completion).route_layer(any_token.clone()),
    );

    // applications: authenticated reads and updates, job seeker create/delete
    app = collection(
        app,
        "/applications/",
        get(application::list_applications)
            .route_layer(any_token.clone())
            .merge(post(application::create_application).route_layer(job_seeker_only.clone())),
    )
    .route(
        "/applications/:id",
        get(application::get_application)
            .patch(application::update_application)
            .route_layer(any_token)
            .merge(axum::routing::delete(application::delete_application).route_layer(job_seeker_only)),
    );

    let budget = RequestBudget::per_second(state.config.api_rps);
    app.fallback(unknown_route)
        .with_state(state)
        .layer(from_fn_with_state(budget, enforce_budget))
        .layer(from_fn(log_requests))
        .layer(TraceLayer::new_for_http())
        .layer(api_cors())
}
