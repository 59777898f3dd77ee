//! Company event model
//!
//! Events are populated exclusively by the external calendar import and
//! cleared wholesale on every re-sync.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub location: Option<String>,
    /// Key of the event in the external calendar, when the source provides one.
    pub external_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An event as returned by the calendar importer, before it is attached
/// to a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedEvent {
    pub name: String,
    pub start_date: NaiveDate,
    pub location: Option<String>,
    pub external_key: Option<String>,
}

impl Event {
    pub fn from_imported(company_id: Uuid, imported: ImportedEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            name: imported.name,
            start_date: imported.start_date,
            location: imported.location,
            external_key: imported.external_key,
            created_at: Utc::now(),
        }
    }
}
