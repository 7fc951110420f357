use async_trait::async_trait;

use super::{delete_by_id, fetch_page, PgStore};
use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::error::Result;
use crate::models::company::Company;
use crate::repositories::{CompanyRepository, Page, PageRequest};

const COLUMNS: &str =
    "id, email, name, industry, location, description, website, created_at, updated_at";

#[async_trait]
impl CompanyRepository for PgStore {
    async fn create_company(&self, payload: &CreateCompanyPayload) -> Result<Company> {
        let query = format!(
            r#"
            INSERT INTO companies (email, name, industry, location, description, website)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(&payload.email)
            .bind(&payload.name)
            .bind(payload.industry)
            .bind(&payload.location)
            .bind(&payload.description)
            .bind(&payload.website)
            .fetch_one(&self.pool)
            .await?;
        Ok(company)
    }

    async fn get_company(&self, id: i64) -> Result<Option<Company>> {
        let query = format!("SELECT {} FROM companies WHERE id = $1", COLUMNS);
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn find_company_by_email(&self, email: &str) -> Result<Option<Company>> {
        let query = format!("SELECT {} FROM companies WHERE email = $1", COLUMNS);
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn list_companies(&self, page: PageRequest) -> Result<Page<Company>> {
        fetch_page(&self.pool, "companies", COLUMNS, page).await
    }

    async fn update_company(&self, id: i64, payload: &UpdateCompanyPayload) -> Result<Option<Company>> {
        let query = format!(
            r#"
            UPDATE companies
            SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                industry = COALESCE($4, industry),
                location = COALESCE($5, location),
                description = COALESCE($6, description),
                website = COALESCE($7, website),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&payload.email)
            .bind(&payload.name)
            .bind(payload.industry)
            .bind(&payload.location)
            .bind(&payload.description)
            .bind(&payload.website)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn company_has_dependents(&self, id: i64) -> Result<bool> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM recruiters WHERE company_id = $1)
                OR EXISTS (SELECT 1 FROM listings WHERE company_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(referenced)
    }

    async fn delete_company(&self, id: i64) -> Result<bool> {
        delete_by_id(&self.pool, "companies", id).await
    }
}
