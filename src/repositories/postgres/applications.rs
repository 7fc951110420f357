use async_trait::async_trait;

use super::{delete_by_id, PgStore};
use crate::dto::application_dto::{CreateApplicationPayload, UpdateApplicationPayload};
use crate::error::Result;
use crate::models::application::Application;
use crate::repositories::{ApplicationRepository, ApplicationScope, Page, PageRequest};

const COLUMNS: &str = "id, listing_id, seeker_id, status, applied_date, created_at, updated_at";

#[async_trait]
impl ApplicationRepository for PgStore {
    async fn create_application(
        &self,
        seeker_id: i64,
        payload: &CreateApplicationPayload,
    ) -> Result<Application> {
        let query = format!(
            r#"
            INSERT INTO applications (listing_id, seeker_id, status, applied_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(payload.listing_id)
            .bind(seeker_id)
            .bind(payload.status)
            .bind(payload.applied_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(application)
    }

    async fn get_application(&self, id: i64) -> Result<Option<Application>> {
        let query = format!("SELECT {} FROM applications WHERE id = $1", COLUMNS);
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn find_application(&self, listing_id: i64, seeker_id: i64) -> Result<Option<Application>> {
        let query = format!(
            "SELECT {} FROM applications WHERE listing_id = $1 AND seeker_id = $2",
            COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(listing_id)
            .bind(seeker_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn list_applications(
        &self,
        scope: ApplicationScope,
        page: PageRequest,
    ) -> Result<Page<Application>> {
        let (condition, owner) = match scope {
            ApplicationScope::Seeker(seeker_id) => ("seeker_id = $1", seeker_id),
            ApplicationScope::Company(company_id) => (
                "listing_id IN (SELECT id FROM listings WHERE company_id = $1)",
                company_id,
            ),
        };

        let items_query = format!(
            "SELECT {} FROM applications WHERE {} ORDER BY id LIMIT $2 OFFSET $3",
            COLUMNS, condition
        );
        let items = sqlx::query_as::<_, Application>(&items_query)
            .bind(owner)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(&self.pool)
            .await?;

        let total_query = format!("SELECT COUNT(*) FROM applications WHERE {}", condition);
        let total = sqlx::query_scalar::<_, i64>(&total_query)
            .bind(owner)
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, total, page))
    }

    async fn update_application(
        &self,
        id: i64,
        payload: &UpdateApplicationPayload,
    ) -> Result<Option<Application>> {
        let query = format!(
            r#"
            UPDATE applications
            SET
                listing_id = COALESCE($2, listing_id),
                seeker_id = COALESCE($3, seeker_id),
                status = COALESCE($4, status),
                applied_date = COALESCE($5, applied_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(payload.listing_id)
            .bind(payload.seeker_id)
            .bind(payload.status)
            .bind(payload.applied_date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(application)
    }

    async fn delete_application(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.pool, "applications", id).await
    }
}
