//! Company API shapes

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::company::Company;
use crate::services::company_rules::CompanyAggregate;

/// Generic response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

/// Bare company row, used in listings
#[derive(Debug, Serialize)]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub company_number: String,
    pub email: Option<String>,
    pub website: Option<String>,
}

impl From<Company> for CompanySummary {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            company_number: company.company_number,
            email: company.email,
            website: company.website,
        }
    }
}

/// Full company view with the derived rule state
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub company_number: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub external_calendar_id: Option<String>,
    pub short_h_brand_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub information_complete: bool,
    pub branding_license: bool,
    pub searchable: bool,
    pub earliest_current_member_fee_date: Option<NaiveDate>,
    pub category_names: Vec<String>,
    pub region_names: Vec<String>,
    pub kommun_names: Vec<String>,
    pub city_names: Vec<String>,
    pub event_count: usize,
}

impl CompanyResponse {
    pub fn from_aggregate(aggregate: &CompanyAggregate, today: NaiveDate) -> Self {
        let company = &aggregate.company;
        Self {
            id: company.id,
            name: company.name.clone(),
            company_number: company.company_number.clone(),
            email: company.email.clone(),
            website: company.website.clone(),
            description: company.description.clone(),
            external_calendar_id: company.external_calendar_id.clone(),
            short_h_brand_url: company.short_h_brand_url.clone(),
            created_at: company.created_at,
            updated_at: company.updated_at,

            information_complete: aggregate.information_complete(),
            branding_license: aggregate.branding_license(today),
            searchable: aggregate.searchable(today),
            earliest_current_member_fee_date: aggregate.earliest_current_member_fee_date(today),
            category_names: aggregate.category_names(),
            region_names: aggregate.region_names(),
            kommun_names: aggregate.kommun_names(),
            city_names: aggregate.city_names(),
            event_count: aggregate.events.len(),
        }
    }
}

/// Resolved mailing address, with the postal-export rendering
#[derive(Debug, Serialize)]
pub struct MainAddressResponse {
    pub address_id: Uuid,
    pub street_address: Option<String>,
    pub post_code: Option<String>,
    pub city: Option<String>,
    pub kommun: Option<String>,
    pub region: Option<String>,
    pub country: String,
    pub mail: bool,
    pub mailing_format: String,
}

#[derive(Debug, Deserialize)]
pub struct ShortBrandUrlRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ShortBrandUrlResponse {
    pub url: String,
    pub newly_stored: bool,
}

#[derive(Debug, Serialize)]
pub struct SyncEventsResponse {
    pub event_count: usize,
}
