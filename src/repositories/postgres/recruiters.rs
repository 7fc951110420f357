use async_trait::async_trait;

use super::{delete_by_id, fetch_page, PgStore};
use crate::dto::recruiter_dto::{CreateRecruiterPayload, UpdateRecruiterPayload};
use crate::error::Result;
use crate::models::recruiter::Recruiter;
use crate::repositories::{Page, PageRequest, RecruiterRepository};

const COLUMNS: &str = "id, user_id, first_name, last_name, company_id, position, phone_number, \
     created_at, updated_at";

#[async_trait]
impl RecruiterRepository for PgStore {
    async fn create_recruiter(&self, user_id: i64, payload: &CreateRecruiterPayload) -> Result<Recruiter> {
        let query = format!(
            r#"
            INSERT INTO recruiters (user_id, first_name, last_name, company_id, position, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        );
        let recruiter = sqlx::query_as::<_, Recruiter>(&query)
            .bind(user_id)
            .bind(&payload.first_name)
            .bind(&payload.last_name)
            .bind(payload.company_id)
            .bind(&payload.position)
            .bind(&payload.phone_number)
            .fetch_one(&self.pool)
            .await?;
        Ok(recruiter)
    }

    async fn get_recruiter(&self, id: i64) -> Result<Option<Recruiter>> {
        let query = format!("SELECT {} FROM recruiters WHERE id = $1", COLUMNS);
        let recruiter = sqlx::query_as::<_, Recruiter>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(recruiter)
    }

    async fn find_recruiter_by_user(&self, user_id: i64) -> Result<Option<Recruiter>> {
        let query = format!("SELECT {} FROM recruiters WHERE user_id = $1", COLUMNS);
        let recruiter = sqlx::query_as::<_, Recruiter>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(recruiter)
    }

    async fn list_recruiters(&self, page: PageRequest) -> Result<Page<Recruiter>> {
        fetch_page(&self.pool, "recruiters", COLUMNS, page).await
    }

    async fn update_recruiter(
        &self,
        id: i64,
        payload: &UpdateRecruiterPayload,
    ) -> Result<Option<Recruiter>> {
        let query = format!(
            r#"
            UPDATE recruiters
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                company_id = COALESCE($4, company_id),
                position = COALESCE($5, position),
                phone_number = COALESCE($6, phone_number),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        let recruiter = sqlx::query_as::<_, Recruiter>(&query)
            .bind(id)
            .bind(&payload.first_name)
            .bind(&payload.last_name)
            .bind(payload.company_id)
            .bind(&payload.position)
            .bind(&payload.phone_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(recruiter)
    }

    async fn delete_recruiter(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.pool, "recruiters", id).await
    }
}
