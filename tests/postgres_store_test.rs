use std::env;

use chrono::Utc;
use jobboard_backend::{
    dto::listing_dto::ListingSearchQuery,
    error::Error,
    models::user::Role,
    repositories::{
        postgres::PgStore, ApplicationRepository, ApplicationScope, CompanyRepository,
        ListingRepository, PageRequest, RecruiterRepository, SeekerRepository, UserRepository,
    },
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;

fn payload<T: DeserializeOwned>(value: JsonValue) -> T {
    serde_json::from_value(value).expect("payload")
}

/// Runs against the database in `DATABASE_URL`; skipped when it is unset.
async fn store() -> Option<PgStore> {
    dotenvy::dotenv().ok();
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PgStore tests");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    Some(PgStore::new(pool))
}

fn run_tag() -> String {
    format!(
        "{}{}",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

fn company(tag: &str, label: &str) -> JsonValue {
    json!({
        "email": format!("{}-{}@pg.example.com", label, tag),
        "name": format!("{} {}", label, tag),
        "industry": "Information Technology",
        "location": "Bengaluru",
        "description": "Data tooling",
        "website": "https://pg.example.com"
    })
}

fn listing(company_id: i64, title: &str, location: &str, employment_type: &str) -> JsonValue {
    json!({
        "company_id": company_id,
        "title": title,
        "description": "Build things",
        "location": location,
        "salary_range": "9L-15L",
        "employment_type": employment_type,
        "application_deadline": "2030-01-31",
        "status": "Still accepting"
    })
}

fn seeker() -> JsonValue {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "desired_job_title": "Backend Engineer",
        "phone_number": "555-0100",
        "location": "London",
        "current_salary": 1200000,
        "skill_set": "Rust"
    })
}

#[tokio::test]
async fn search_filters_and_escapes_like_patterns() {
    let Some(store) = store().await else { return };
    let tag = run_tag();
    let acme = store
        .create_company(&payload(company(&tag, "search")))
        .await
        .expect("company");

    for (title, location, kind) in [
        (format!("Rust Engineer {}", tag), "Remote", "Full-Time"),
        (format!("Data engineer {}", tag), "Hybrid", "Part-Time"),
        (format!("100% Remote Engineer {}", tag), "Remote", "Full-Time"),
        (format!("Designer {}", tag), "Remote", "Full-Time"),
    ] {
        store
            .create_listing(&payload(listing(acme.id, &title, location, kind)))
            .await
            .expect("listing");
    }

    let query: ListingSearchQuery = payload(json!({ "title": format!("engineer {}", tag) }));
    let page = store
        .search_listings(&query.filters().expect("filters"), PageRequest { skip: 0, limit: 50 })
        .await
        .expect("search");
    assert_eq!(page.total, 3);

    let query: ListingSearchQuery = payload(json!({
        "title": tag,
        "location": "remote",
        "employment_type": "full-time"
    }));
    let page = store
        .search_listings(&query.filters().expect("filters"), PageRequest { skip: 0, limit: 50 })
        .await
        .expect("search");
    assert_eq!(page.total, 3);
    assert!(page.items.iter().all(|item| item.company_id == acme.id));

    let query: ListingSearchQuery = payload(json!({ "title": format!("100% Remote Engineer {}", tag) }));
    let page = store
        .search_listings(&query.filters().expect("filters"), PageRequest { skip: 0, limit: 50 })
        .await
        .expect("search");
    assert_eq!(page.total, 1);

    let query: ListingSearchQuery = payload(json!({ "title": format!("1_0% Remote {}", tag) }));
    let page = store
        .search_listings(&query.filters().expect("filters"), PageRequest { skip: 0, limit: 50 })
        .await
        .expect("search");
    assert_eq!(page.total, 0);

    let page = store
        .search_listings(&query.filters().expect("filters"), PageRequest { skip: 0, limit: 1 })
        .await
        .expect("search");
    assert!(page.items.is_empty());
    assert_eq!(page.limit, 1);
}

#[tokio::test]
async fn partial_updates_keep_unsupplied_columns() {
    let Some(store) = store().await else { return };
    let tag = run_tag();
    let user = store
        .create_user(&format!("update-{}@pg.example.com", tag), "hash", Role::JobSeeker)
        .await
        .expect("user");
    let created = store
        .create_seeker(user.id, &payload(seeker()))
        .await
        .expect("seeker");
    assert_eq!(created.user_id, user.id);

    let unchanged = store
        .update_seeker(created.id, &payload(json!({})))
        .await
        .expect("update")
        .expect("seeker");
    assert_eq!(unchanged.first_name, created.first_name);
    assert_eq!(unchanged.skill_set, created.skill_set);

    let patched = store
        .update_seeker(created.id, &payload(json!({ "location": "Paris", "past_experience": "3 years" })))
        .await
        .expect("update")
        .expect("seeker");
    assert_eq!(patched.location, "Paris");
    assert_eq!(patched.past_experience.as_deref(), Some("3 years"));
    assert_eq!(patched.skill_set.as_deref(), Some("Rust"));
    assert_eq!(patched.desired_job_title, created.desired_job_title);

    let cleared = store
        .update_seeker(created.id, &payload(json!({ "skill_set": null })))
        .await
        .expect("update")
        .expect("seeker");
    assert_eq!(cleared.skill_set, None);
    assert_eq!(cleared.past_experience.as_deref(), Some("3 years"));

    assert!(store
        .update_seeker(i64::MAX, &payload(json!({ "location": "Oslo" })))
        .await
        .expect("update")
        .is_none());

    assert!(store.delete_seeker(created.id).await.expect("delete"));
    assert!(store.delete_user(user.id).await.expect("delete user"));
}

#[tokio::test]
async fn profiles_are_unique_per_user_and_restrict_deletes() {
    let Some(store) = store().await else { return };
    let tag = run_tag();
    let user = store
        .create_user(&format!("owner-{}@pg.example.com", tag), "hash", Role::Recruiter)
        .await
        .expect("user");
    let acme = store
        .create_company(&payload(company(&tag, "owner")))
        .await
        .expect("company");
    let profile = json!({
        "first_name": "Rita",
        "last_name": "Rao",
        "company_id": acme.id,
        "position": "Talent lead",
        "phone_number": "555-0101"
    });

    let recruiter = store
        .create_recruiter(user.id, &payload(profile.clone()))
        .await
        .expect("recruiter");
    let found = store
        .find_recruiter_by_user(user.id)
        .await
        .expect("lookup")
        .expect("profile");
    assert_eq!(found.id, recruiter.id);

    let second = store.create_recruiter(user.id, &payload(profile)).await;
    assert!(matches!(second, Err(Error::Conflict(_))), "{:?}", second);

    assert!(matches!(store.delete_user(user.id).await, Err(Error::Conflict(_))));
    assert!(matches!(store.delete_company(acme.id).await, Err(Error::Conflict(_))));

    assert!(store.delete_recruiter(recruiter.id).await.expect("delete"));
    assert!(store.delete_company(acme.id).await.expect("delete company"));
    assert!(store.delete_user(user.id).await.expect("delete user"));
    assert!(store.find_recruiter_by_user(user.id).await.expect("lookup").is_none());
}

#[tokio::test]
async fn application_lists_follow_their_scope() {
    let Some(store) = store().await else { return };
    let tag = run_tag();
    let mine = store
        .create_company(&payload(company(&tag, "mine")))
        .await
        .expect("company");
    let theirs = store
        .create_company(&payload(company(&tag, "theirs")))
        .await
        .expect("company");
    let open_role = store
        .create_listing(&payload(listing(mine.id, "Platform Engineer", "Hybrid", "Full-Time")))
        .await
        .expect("listing");
    let other_role = store
        .create_listing(&payload(listing(theirs.id, "Data Engineer", "Remote", "Part-Time")))
        .await
        .expect("listing");

    let mut seekers = Vec::new();
    for label in ["first", "second"] {
        let user = store
            .create_user(&format!("{}-{}@pg.example.com", label, tag), "hash", Role::JobSeeker)
            .await
            .expect("user");
        seekers.push(store.create_seeker(user.id, &payload(seeker())).await.expect("seeker"));
    }

    let page = PageRequest { skip: 0, limit: 50 };
    let first = store
        .create_application(seekers[0].id, &payload(json!({ "listing_id": open_role.id })))
        .await
        .expect("application");
    store
        .create_application(seekers[0].id, &payload(json!({ "listing_id": other_role.id })))
        .await
        .expect("application");
    store
        .create_application(seekers[1].id, &payload(json!({ "listing_id": open_role.id })))
        .await
        .expect("application");

    let duplicate = store
        .create_application(seekers[0].id, &payload(json!({ "listing_id": open_role.id })))
        .await;
    assert!(matches!(duplicate, Err(Error::Conflict(_))));

    let own = store
        .list_applications(ApplicationScope::Seeker(seekers[0].id), page)
        .await
        .expect("list");
    assert_eq!(own.total, 2);
    assert!(own.items.iter().all(|item| item.seeker_id == seekers[0].id));
    assert_eq!(own.items[0].id, first.id);

    let company = store
        .list_applications(ApplicationScope::Company(mine.id), page)
        .await
        .expect("list");
    assert_eq!(company.total, 2);
    assert!(company.items.iter().all(|item| item.listing_id == open_role.id));

    let window = store
        .list_applications(ApplicationScope::Company(mine.id), PageRequest { skip: 1, limit: 1 })
        .await
        .expect("list");
    assert_eq!(window.total, 2);
    assert_eq!(window.items.len(), 1);
    assert_ne!(window.items[0].id, company.items[0].id);

    assert!(matches!(store.delete_listing(open_role.id).await, Err(Error::Conflict(_))));
}
