//! Company model
//!
//! Maps to the `companies` table. The company number is a Swedish
//! organisationsnummer, unique across the table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::sanitize::sanitize_field;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub company_number: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    /// Identifier of the company's external event calendar. Blank means
    /// the company has no imported events.
    pub external_calendar_id: Option<String>,
    /// Memoized shortened branding URL, set at most once.
    pub short_h_brand_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(name: String, company_number: String, email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            company_number,
            email,
            website: None,
            description: None,
            external_calendar_id: None,
            short_h_brand_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    pub fn calendar_id_blank(&self) -> bool {
        self.external_calendar_id
            .as_deref()
            .map(|id| id.trim().is_empty())
            .unwrap_or(true)
    }

    /// Strip executable-script content from the public free-text fields.
    /// Runs before every save.
    pub fn sanitize(&mut self) {
        sanitize_field(&mut self.website);
        sanitize_field(&mut self.description);
    }
}

/// Request to register a new company
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    // A company may be registered before its public name is decided;
    // completeness is a derived predicate, not a creation constraint.
    pub name: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_org_number")]
    pub company_number: String,

    #[validate(regex(path = "crate::utils::validation::EMAIL_REGEX"))]
    pub email: Option<String>,

    pub website: Option<String>,
    pub description: Option<String>,
    pub external_calendar_id: Option<String>,
}

/// Request to update an existing company
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,

    #[validate(custom = "crate::utils::validation::validate_org_number")]
    pub company_number: Option<String>,

    #[validate(regex(path = "crate::utils::validation::EMAIL_REGEX"))]
    pub email: Option<String>,

    pub website: Option<String>,
    pub description: Option<String>,
    pub external_calendar_id: Option<String>,
}
