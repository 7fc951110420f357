use async_trait::async_trait;

use super::{delete_by_id, fetch_page, PgStore};
use crate::dto::listing_dto::{CreateListingPayload, UpdateListingPayload};
use crate::error::Result;
use crate::models::listing::Listing;
use crate::repositories::{ListingFilters, ListingRepository, Page, PageRequest};
use crate::utils::validation::like_pattern;

const COLUMNS: &str = "id, company_id, title, description, location, salary_range, \
     employment_type, posted_date, application_deadline, status, created_at, updated_at";

#[async_trait]
impl ListingRepository for PgStore {
    async fn create_listing(&self, payload: &CreateListingPayload) -> Result<Listing> {
        let query = format!(
            r#"
            INSERT INTO listings (
                company_id, title, description, location, salary_range,
                employment_type, posted_date, application_deadline, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COLUMNS
        );
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(payload.company_id)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(payload.location)
            .bind(payload.salary_range)
            .bind(payload.employment_type)
            .bind(payload.posted_date)
            .bind(payload.application_deadline)
            .bind(payload.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(listing)
    }

    async fn get_listing(&self, id: i64) -> Result<Option<Listing>> {
        let query = format!("SELECT {} FROM listings WHERE id = $1", COLUMNS);
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(listing)
    }

    async fn list_listings(&self, page: PageRequest) -> Result<Page<Listing>> {
        fetch_page(&self.pool, "listings", COLUMNS, page).await
    }

    async fn search_listings(&self, filters: &ListingFilters, page: PageRequest) -> Result<Page<Listing>> {
        let mut clauses = Vec::new();
        let mut args: Vec<String> = Vec::new();

        if let Some(title) = &filters.title {
            clauses.push(format!("title ILIKE ${}", args.len() + 1));
            args.push(like_pattern(title));
        }
        if let Some(location) = &filters.location {
            clauses.push(format!("location::text ILIKE ${}", args.len() + 1));
            args.push(like_pattern(location));
        }
        if let Some(employment_type) = filters.employment_type {
            clauses.push(format!("employment_type::text = ${}", args.len() + 1));
            args.push(employment_type.as_str().to_string());
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let items_query = format!(
            "SELECT {} FROM listings {} ORDER BY id LIMIT ${} OFFSET ${}",
            COLUMNS,
            where_clause,
            args.len() + 1,
            args.len() + 2
        );
        let mut items_statement = sqlx::query_as::<_, Listing>(&items_query);
        for value in &args {
            items_statement = items_statement.bind(value);
        }
        let items = items_statement
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;

        let total_query = format!("SELECT COUNT(*) FROM listings {}", where_clause);
        let mut total_statement = sqlx::query_scalar::<_, i64>(&total_query);
        for value in &args {
            total_statement = total_statement.bind(value);
        }
        let total = total_statement.fetch_one(&self.pool).await?;

        Ok(Page::new(items, total, page))
    }

    async fn update_listing(&self, id: i64, payload: &UpdateListingPayload) -> Result<Option<Listing>> {
        let query = format!(
            r#"
            UPDATE listings
            SET
                company_id = COALESCE($2, company_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                location = COALESCE($5, location),
                salary_range = COALESCE($6, salary_range),
                employment_type = COALESCE($7, employment_type),
                posted_date = COALESCE($8, posted_date),
                application_deadline = COALESCE($9, application_deadline),
                status = COALESCE($10, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        let listing = sqlx::query_as::<_, Listing>(&query)
            .bind(id)
            .bind(payload.company_id)
            .bind(&payload.title)
            .bind(&payload.description)
            .bind(payload.location)
            .bind(payload.salary_range)
            .bind(payload.employment_type)
            .bind(payload.posted_date)
            .bind(payload.application_deadline)
            .bind(payload.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(listing)
    }

    async fn listing_has_dependents(&self, id: i64) -> Result<bool> {
        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE listing_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(referenced)
    }

    async fn delete_listing(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.pool, "listings", id).await
    }
}
