//! Company controller
//!
//! Orchestrates the save/destroy pipelines around the rules engine:
//! sanitize before validate before persist, destroy guard before cascade.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::company_dto::{
    ApiResponse, CompanyResponse, CompanySummary, MainAddressResponse, ShortBrandUrlResponse,
    SyncEventsResponse,
};
use crate::models::company::{Company, CreateCompanyRequest, UpdateCompanyRequest};
use crate::repositories::address_repository::AddressRepository;
use crate::repositories::company_repository::CompanyRepository;
use crate::services::address_export::to_mailing_format;
use crate::services::company_rules::CompanyAggregate;
use crate::services::event_sync::{EventImporter, EventSyncService};
use crate::services::url_shortener::{get_or_create_short_brand_url, UrlShortener};
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct CompanyController {
    pool: PgPool,
    repository: CompanyRepository,
    addresses: AddressRepository,
    event_sync: EventSyncService,
    url_shortener: Arc<dyn UrlShortener>,
}

impl CompanyController {
    pub fn new(
        pool: PgPool,
        event_importer: Arc<dyn EventImporter>,
        url_shortener: Arc<dyn UrlShortener>,
    ) -> Self {
        Self {
            repository: CompanyRepository::new(pool.clone()),
            addresses: AddressRepository::new(pool.clone()),
            event_sync: EventSyncService::new(event_importer),
            url_shortener,
            pool,
        }
    }

    pub async fn register(
        &self,
        request: CreateCompanyRequest,
    ) -> Result<ApiResponse<CompanySummary>, AppError> {
        request.validate()?;

        if self
            .repository
            .company_number_exists(&request.company_number, None)
            .await?
        {
            return Err(conflict_error(
                "Company",
                "company_number",
                &request.company_number,
            ));
        }

        let mut company = Company::new(
            request.name.unwrap_or_default(),
            request.company_number,
            request.email,
        );
        company.website = request.website;
        company.description = request.description;
        company.external_calendar_id = request.external_calendar_id;
        company.sanitize();

        let saved = self.repository.create(&company).await?;

        if !saved.calendar_id_blank() {
            // the initial import is part of the registration save: a rejected
            // calendar identifier aborts the whole registration
            if let Err(e) = self
                .event_sync
                .fetch_external_events(&self.pool, &saved, true, false)
                .await
            {
                self.repository.destroy(saved.id).await?;
                return Err(e);
            }
        }

        Ok(ApiResponse::success_with_message(
            saved.into(),
            "Company registered".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: uuid::Uuid,
        request: UpdateCompanyRequest,
    ) -> Result<ApiResponse<CompanySummary>, AppError> {
        request.validate()?;

        let previous = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))?;

        if let Some(ref company_number) = request.company_number {
            if company_number != &previous.company_number
                && self
                    .repository
                    .company_number_exists(company_number, Some(id))
                    .await?
            {
                return Err(conflict_error("Company", "company_number", company_number));
            }
        }

        let mut company = previous.clone();
        if let Some(name) = request.name {
            company.name = name;
        }
        if let Some(company_number) = request.company_number {
            company.company_number = company_number;
        }
        if let Some(email) = request.email {
            company.email = Some(email);
        }
        if request.website.is_some() {
            company.website = request.website;
        }
        if request.description.is_some() {
            company.description = request.description;
        }
        if request.external_calendar_id.is_some() {
            company.external_calendar_id = request.external_calendar_id;
        }
        company.sanitize();

        let calendar_id_changed = company.external_calendar_id != previous.external_calendar_id;
        let saved = self.repository.update(&company).await?;

        if let Err(e) = self
            .event_sync
            .fetch_external_events(&self.pool, &saved, calendar_id_changed, true)
            .await
        {
            // compensate: a rejected identifier must leave the persisted
            // company unchanged
            self.repository.update(&previous).await?;
            return Err(e);
        }

        Ok(ApiResponse::success(saved.into()))
    }

    pub async fn get_by_id(&self, id: uuid::Uuid) -> Result<CompanyResponse, AppError> {
        let aggregate = self
            .repository
            .load_aggregate(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))?;

        Ok(CompanyResponse::from_aggregate(
            &aggregate,
            Utc::now().date_naive(),
        ))
    }

    /// Public listing: only searchable companies.
    pub async fn list_searchable(&self) -> Result<Vec<CompanySummary>, AppError> {
        let companies = self.repository.searchable(Utc::now().date_naive()).await?;
        Ok(companies.into_iter().map(CompanySummary::from).collect())
    }

    pub async fn destroy(&self, id: uuid::Uuid) -> Result<ApiResponse<()>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))?;

        self.repository.destroy(id).await?;
        Ok(ApiResponse::success_with_message((), "Company deleted".to_string()))
    }

    /// Resolve and format the mailing address, creating and persisting an
    /// empty address when the company has none.
    pub async fn main_address(&self, id: uuid::Uuid) -> Result<MainAddressResponse, AppError> {
        let mut aggregate = self
            .repository
            .load_aggregate(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))?;

        let before = aggregate.addresses.len();
        let address = aggregate.resolve_main_address().clone();
        if aggregate.addresses.len() > before {
            self.addresses.insert(&address).await?;
        }

        let mailing_format = to_mailing_format(&aggregate.company.name, &address);
        Ok(MainAddressResponse {
            address_id: address.id,
            street_address: address.street_address,
            post_code: address.post_code,
            city: address.city,
            kommun: address.kommun,
            region: address.region,
            country: address.country,
            mail: address.mail,
            mailing_format,
        })
    }

    pub async fn short_brand_url(
        &self,
        id: uuid::Uuid,
        url: String,
    ) -> Result<ShortBrandUrlResponse, AppError> {
        let mut company = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))?;

        let result =
            get_or_create_short_brand_url(&mut company, &url, self.url_shortener.as_ref()).await;
        if result.newly_stored {
            self.repository.store_short_brand_url(id, &result.url).await?;
        }

        Ok(ShortBrandUrlResponse {
            url: result.url,
            newly_stored: result.newly_stored,
        })
    }

    /// Manual event re-import, outside a save.
    pub async fn sync_events(&self, id: uuid::Uuid) -> Result<SyncEventsResponse, AppError> {
        let company = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))?;

        let events = self
            .event_sync
            .fetch_external_events(&self.pool, &company, true, false)
            .await?;

        Ok(SyncEventsResponse {
            event_count: events.len(),
        })
    }

    pub async fn load_aggregate(&self, id: uuid::Uuid) -> Result<CompanyAggregate, AppError> {
        self.repository
            .load_aggregate(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))
    }
}
