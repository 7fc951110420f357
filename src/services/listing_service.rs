use std::sync::Arc;

use validator::Validate;

use crate::dto::listing_dto::{CreateListingPayload, UpdateListingPayload};
use crate::error::{Error, Result};
use crate::models::listing::Listing;
use crate::repositories::{CompanyRepository, ListingFilters, ListingRepository, Page, PageRequest};

#[derive(Clone)]
pub struct ListingService {
    listings: Arc<dyn ListingRepository>,
    companies: Arc<dyn CompanyRepository>,
}

fn not_found(id: i64) -> Error {
    Error::NotFound(format!("Listing {} not found", id))
}

impl ListingService {
    pub fn new(listings: Arc<dyn ListingRepository>, companies: Arc<dyn CompanyRepository>) -> Self {
        Self {
            listings,
            companies,
        }
    }

    async fn ensure_company(&self, company_id: i64) -> Result<()> {
        if self.companies.get_company(company_id).await?.is_none() {
            tracing::warn!(company_id, "listing references a missing company");
            return Err(Error::NotFound(format!("Company {} not found", company_id)));
        }
        Ok(())
    }

    pub async fn create(&self, payload: CreateListingPayload) -> Result<Listing> {
        payload.validate()?;
        self.ensure_company(payload.company_id).await?;
        let listing = self.listings.create_listing(&payload).await?;
        tracing::info!(listing_id = listing.id, company_id = listing.company_id, "listing created");
        Ok(listing)
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Listing>> {
        self.listings.list_listings(page).await
    }

    pub async fn search(&self, filters: ListingFilters, page: PageRequest) -> Result<Page<Listing>> {
        let result = self.listings.search_listings(&filters, page).await?;
        tracing::debug!(
            title = ?filters.title,
            location = ?filters.location,
            employment_type = ?filters.employment_type,
            total = result.total,
            "listing search"
        );
        Ok(result)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Listing> {
        self.listings.get_listing(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn update(&self, id: i64, payload: UpdateListingPayload) -> Result<Listing> {
        payload.validate()?;
        if payload.is_empty() {
            return self.get_by_id(id).await;
        }
        self.get_by_id(id).await?;
        if let Some(company_id) = payload.company_id {
            self.ensure_company(company_id).await?;
        }
        let listing = self
            .listings
            .update_listing(id, &payload)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(listing_id = id, "listing updated");
        Ok(listing)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;
        if self.listings.listing_has_dependents(id).await? {
            tracing::warn!(listing_id = id, "listing still has applications");
            return Err(Error::Conflict(format!("Listing {} still has applications", id)));
        }
        if !self.listings.delete_listing(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(listing_id = id, "listing deleted");
        Ok(())
    }
}
