use async_trait::async_trait;

use super::{delete_by_id, fetch_page, PgStore};
use crate::dto::seeker_dto::{CreateSeekerPayload, UpdateSeekerPayload};
use crate::error::Result;
use crate::models::seeker::Seeker;
use crate::repositories::{Page, PageRequest, SeekerRepository};

const COLUMNS: &str = "id, user_id, first_name, last_name, desired_job_title, phone_number, location, \
     current_salary, past_experience, skill_set, created_at, updated_at";

#[async_trait]
impl SeekerRepository for PgStore {
    async fn create_seeker(&self, user_id: i64, payload: &CreateSeekerPayload) -> Result<Seeker> {
        let query = format!(
            r#"
            INSERT INTO seekers (
                user_id, first_name, last_name, desired_job_title, phone_number, location,
                current_salary, past_experience, skill_set
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COLUMNS
        );
        let seeker = sqlx::query_as::<_, Seeker>(&query)
            .bind(user_id)
            .bind(&payload.first_name)
            .bind(&payload.last_name)
            .bind(&payload.desired_job_title)
            .bind(&payload.phone_number)
            .bind(&payload.location)
            .bind(payload.current_salary)
            .bind(&payload.past_experience)
            .bind(&payload.skill_set)
            .fetch_one(&self.pool)
            .await?;
        Ok(seeker)
    }

    async fn get_seeker(&self, id: i64) -> Result<Option<Seeker>> {
        let query = format!("SELECT {} FROM seekers WHERE id = $1", COLUMNS);
        let seeker = sqlx::query_as::<_, Seeker>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(seeker)
    }

    async fn find_seeker_by_user(&self, user_id: i64) -> Result<Option<Seeker>> {
        let query = format!("SELECT {} FROM seekers WHERE user_id = $1", COLUMNS);
        let seeker = sqlx::query_as::<_, Seeker>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(seeker)
    }

    async fn list_seekers(&self, page: PageRequest) -> Result<Page<Seeker>> {
        fetch_page(&self.pool, "seekers", COLUMNS, page).await
    }

    async fn update_seeker(&self, id: i64, payload: &UpdateSeekerPayload) -> Result<Option<Seeker>> {
        let query = format!(
            r#"
            UPDATE seekers
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                desired_job_title = COALESCE($4, desired_job_title),
                phone_number = COALESCE($5, phone_number),
                location = COALESCE($6, location),
                current_salary = COALESCE($7, current_salary),
                past_experience = CASE WHEN $8 THEN $9 ELSE past_experience END,
                skill_set = CASE WHEN $10 THEN $11 ELSE skill_set END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        let seeker = sqlx::query_as::<_, Seeker>(&query)
            .bind(id)
            .bind(&payload.first_name)
            .bind(&payload.last_name)
            .bind(&payload.desired_job_title)
            .bind(&payload.phone_number)
            .bind(&payload.location)
            .bind(payload.current_salary)
            .bind(payload.past_experience.is_some())
            .bind(payload.past_experience.clone().flatten())
            .bind(payload.skill_set.is_some())
            .bind(payload.skill_set.clone().flatten())
            .fetch_optional(&self.pool)
            .await?;
        Ok(seeker)
    }

    async fn seeker_has_dependents(&self, id: i64) -> Result<bool> {
        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM applications WHERE seeker_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(referenced)
    }

    async fn delete_seeker(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.pool, "seekers", id).await
    }
}
