//! Address model
//!
//! Addresses carry an explicit owner reference (`addressable_type` +
//! `addressable_id`) so a single table serves companies and users alike.
//! Region resolution drives the company completeness rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How much of the address is shown publicly. `None` hides it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "address_visibility", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AddressVisibility {
    None,
    StreetAddress,
    PostCode,
    City,
    Kommun,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: Uuid,
    pub addressable_type: String,
    pub addressable_id: Uuid,
    pub street_address: Option<String>,
    pub post_code: Option<String>,
    pub city: Option<String>,
    pub kommun: Option<String>,
    /// Resolved region name. `None` until geocoding/lookup has resolved it.
    pub region: Option<String>,
    pub country: String,
    pub visibility: AddressVisibility,
    /// Flags the company's mailing address. At most one per owner.
    pub mail: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const ADDRESSABLE_COMPANY: &str = "Company";

impl Address {
    /// A brand-new empty address attached to a company, used when a company
    /// has no address at all yet.
    pub fn new_empty_for_company(company_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            addressable_type: ADDRESSABLE_COMPANY.to_string(),
            addressable_id: company_id,
            street_address: None,
            post_code: None,
            city: None,
            kommun: None,
            region: None,
            country: "Sverige".to_string(),
            visibility: AddressVisibility::None,
            mail: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_region(&self) -> bool {
        self.region
            .as_deref()
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn visible(&self) -> bool {
        self.visibility != AddressVisibility::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty_for_company() {
        let company_id = Uuid::new_v4();
        let address = Address::new_empty_for_company(company_id);
        assert_eq!(address.addressable_type, ADDRESSABLE_COMPANY);
        assert_eq!(address.addressable_id, company_id);
        assert_eq!(address.country, "Sverige");
        assert!(!address.has_region());
        assert!(!address.visible());
    }

    #[test]
    fn test_has_region() {
        let mut address = Address::new_empty_for_company(Uuid::new_v4());
        assert!(!address.has_region());
        address.region = Some("  ".to_string());
        assert!(!address.has_region());
        address.region = Some("Stockholm".to_string());
        assert!(address.has_region());
    }

    #[test]
    fn test_visible() {
        let mut address = Address::new_empty_for_company(Uuid::new_v4());
        assert!(!address.visible());
        address.visibility = AddressVisibility::City;
        assert!(address.visible());
    }
}
