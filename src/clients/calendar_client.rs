//! HTTP client for the external event-calendar provider
//!
//! Implements [`EventImporter`] against the provider's REST API. The two
//! identifier failures the provider can report are mapped to the importer's
//! error kinds; anything else surfaces unchanged.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::company::Company;
use crate::models::event::ImportedEvent;
use crate::services::event_sync::{EventImporter, ImportError};

#[derive(Debug, Deserialize)]
struct ProviderEventsResponse {
    events: Vec<ProviderEvent>,
}

#[derive(Debug, Deserialize)]
struct ProviderEvent {
    name: String,
    start_date: NaiveDate,
    location: Option<String>,
    #[serde(rename = "key")]
    external_key: Option<String>,
}

pub struct CalendarClient {
    base_url: String,
    client: reqwest::Client,
}

impl CalendarClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Identifier characters accepted by the provider's URL scheme.
    fn key_is_well_formed(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }
}

#[async_trait]
impl EventImporter for CalendarClient {
    async fn import(
        &self,
        company: &Company,
        start_date: NaiveDate,
    ) -> Result<Vec<ImportedEvent>, ImportError> {
        let key = company
            .external_calendar_id
            .as_deref()
            .unwrap_or_default()
            .trim();

        if !Self::key_is_well_formed(key) {
            return Err(ImportError::InvalidCharacters);
        }

        let url = format!(
            "{}/v1/events?calendar={}&from={}",
            self.base_url,
            urlencoding::encode(key),
            start_date
        );

        log::info!("fetching calendar events for company {}", company.id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ImportError::Other(anyhow::anyhow!("calendar request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            // the provider answers 404 for unknown calendar identifiers
            return Err(ImportError::InvalidKey);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::Other(anyhow::anyhow!(
                "calendar provider returned {}: {}",
                status,
                body
            )));
        }

        let parsed: ProviderEventsResponse = response
            .json()
            .await
            .map_err(|e| ImportError::Other(anyhow::anyhow!("bad calendar response: {}", e)))?;

        Ok(parsed
            .events
            .into_iter()
            .map(|e| ImportedEvent {
                name: e.name,
                start_date: e.start_date,
                location: e.location,
                external_key: e.external_key,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_well_formed() {
        assert!(CalendarClient::key_is_well_formed("cal-123_AB"));
        assert!(!CalendarClient::key_is_well_formed(""));
        assert!(!CalendarClient::key_is_well_formed("cal 123"));
        assert!(!CalendarClient::key_is_well_formed("cal/123"));
        assert!(!CalendarClient::key_is_well_formed("nyckel:åäö"));
    }
}
