use std::sync::Arc;

use validator::Validate;

use crate::dto::company_dto::{CreateCompanyPayload, UpdateCompanyPayload};
use crate::error::{Error, Result};
use crate::models::company::Company;
use crate::repositories::{CompanyRepository, Page, PageRequest};
use crate::utils::validation::normalize_email;

#[derive(Clone)]
pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Company {} not found", id))
}

fn email_taken() -> Error {
    Error::Conflict("A company with this email already exists".to_string())
}

impl CompanyService {
    pub fn new(companies: Arc<dyn CompanyRepository>) -> Self {
        Self { companies }
    }

    pub async fn create(&self, mut payload: CreateCompanyPayload) -> Result<Company> {
        payload.email = normalize_email(&payload.email);
        payload.validate()?;
        if self.companies.find_company_by_email(&payload.email).await?.is_some() {
            tracing::warn!(email = %payload.email, "company email already in use");
            return Err(email_taken());
        }
        let company = self.companies.create_company(&payload).await?;
        tracing::info!(company_id = company.id, "company created");
        Ok(company)
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Company>> {
        self.companies.list_companies(page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Company> {
        self.companies.get_company(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(&self, id: i64, mut payload: UpdateCompanyPayload) -> Result<Company> {
        payload.email = payload.email.as_deref().map(normalize_email);
        payload.validate()?;
        if payload.is_empty() {
            return self.get_by_id(id).await;
        }
        if let Some(email) = &payload.email {
            if let Some(owner) = self.companies.find_company_by_email(email).await? {
                if owner.id != id {
                    tracing::warn!(company_id = id, "company email already in use");
                    return Err(email_taken());
                }
            }
        }
        let company = self
            .companies
            .update_company(id, &payload)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(company_id = id, "company updated");
        Ok(company)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;
        if self.companies.company_has_dependents(id).await? {
            tracing::warn!(company_id = id, "company still has recruiters or listings");
            return Err(Error::Conflict(format!(
                "Company {} still has recruiters or listings",
                id
            )));
        }
        if !self.companies.delete_company(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(company_id = id, "company deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::Industry;
    use crate::repositories::MockCompanyRepository;
    use crate::utils::time::now;

    #[tokio::test]
    async fn delete_with_dependents_is_a_conflict() {
        let mut repo = MockCompanyRepository::new();
        repo.expect_get_company().returning(|id| {
            let at = now();
            Ok(Some(Company {
                id,
                email: "hr@acme.test".into(),
                name: "Acme".into(),
                industry: Industry::Electronics,
                location: "Delhi".into(),
                description: "Chips".into(),
                website: "https://acme.test".into(),
                created_at: at,
                updated_at: at,
            }))
        });
        repo.expect_company_has_dependents().returning(|_| Ok(true));
        repo.expect_delete_company().never();

        let service = CompanyService::new(Arc::new(repo));
        assert!(matches!(service.delete(1).await, Err(Error::Conflict(_))));
    }
}
