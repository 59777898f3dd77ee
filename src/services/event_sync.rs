//! External event synchronization
//!
//! Re-imports a company's events from its external calendar. The import is
//! all-or-nothing: owned events are cleared and repopulated inside one
//! transaction, so an importer failure leaves the persisted state unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::models::company::Company;
use crate::models::event::{Event, ImportedEvent};
use crate::repositories::event_repository::EventRepository;
use crate::utils::errors::{field_error, AppError, AppResult};

/// Failures the calendar importer can report.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The identifier does not correspond to any calendar at the provider.
    #[error("calendar identifier is not recognized by the provider")]
    InvalidKey,

    /// The identifier contains characters that cannot form a valid request.
    #[error("calendar identifier contains invalid characters")]
    InvalidCharacters,

    /// Anything else (network, provider outage). Never swallowed.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// External calendar collaborator.
#[async_trait]
pub trait EventImporter: Send + Sync {
    async fn import(
        &self,
        company: &Company,
        start_date: NaiveDate,
    ) -> Result<Vec<ImportedEvent>, ImportError>;
}

/// What a sync invocation should do, decided before any side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPlan {
    /// `on_update` and the identifier did not change: leave events alone.
    Skip,
    /// Blank identifier: clear events and stop. Intentional, not an error.
    ClearOnly,
    /// Clear events, then import starting from `start_date`.
    ClearAndImport { start_date: NaiveDate },
}

/// Decide the sync plan. Pulled out of the executing path so the
/// skip/clear/import decision is testable without a database.
pub fn plan_sync(
    company: &Company,
    calendar_id_changed: bool,
    on_update: bool,
    today: NaiveDate,
) -> SyncPlan {
    if on_update && !calendar_id_changed {
        return SyncPlan::Skip;
    }
    if company.calendar_id_blank() {
        return SyncPlan::ClearOnly;
    }
    // start from yesterday to tolerate timezone skew at the provider
    SyncPlan::ClearAndImport {
        start_date: today - Duration::days(1),
    }
}

/// Map an importer failure to the application error taxonomy: the two
/// known identifier failures become field-level validation errors,
/// everything else propagates as an external API failure.
pub fn import_failure_to_error(err: ImportError) -> AppError {
    match err {
        ImportError::InvalidKey => field_error(
            "external_calendar_id",
            "invalid",
            "the calendar identifier does not match any calendar at the provider",
        ),
        ImportError::InvalidCharacters => field_error(
            "external_calendar_id",
            "invalid_characters",
            "the calendar identifier contains characters that cannot form a valid request",
        ),
        ImportError::Other(e) => AppError::ExternalApi(e.to_string()),
    }
}

pub struct EventSyncService {
    importer: Arc<dyn EventImporter>,
}

impl EventSyncService {
    pub fn new(importer: Arc<dyn EventImporter>) -> Self {
        Self { importer }
    }

    /// Re-sync a company's events per the plan. Returns the events now
    /// owned by the company.
    pub async fn fetch_external_events(
        &self,
        pool: &PgPool,
        company: &Company,
        calendar_id_changed: bool,
        on_update: bool,
    ) -> AppResult<Vec<Event>> {
        let today = Utc::now().date_naive();
        match plan_sync(company, calendar_id_changed, on_update, today) {
            SyncPlan::Skip => {
                log::debug!(
                    "event sync skipped for company {}: identifier unchanged",
                    company.id
                );
                EventRepository::new(pool.clone()).list_for_company(company.id).await
            }
            SyncPlan::ClearOnly => {
                let mut tx = pool.begin().await?;
                EventRepository::delete_for_company(&mut tx, company.id).await?;
                tx.commit().await?;
                log::info!("events cleared for company {}: blank calendar identifier", company.id);
                Ok(Vec::new())
            }
            SyncPlan::ClearAndImport { start_date } => {
                let mut tx = pool.begin().await?;
                EventRepository::delete_for_company(&mut tx, company.id).await?;

                match self.importer.import(company, start_date).await {
                    Ok(imported) => {
                        let mut events = Vec::with_capacity(imported.len());
                        for item in imported {
                            let event = Event::from_imported(company.id, item);
                            EventRepository::insert(&mut tx, &event).await?;
                            events.push(event);
                        }
                        tx.commit().await?;
                        log::info!(
                            "imported {} events for company {}",
                            events.len(),
                            company.id
                        );
                        Ok(events)
                    }
                    Err(e) => {
                        tx.rollback().await?;
                        Err(import_failure_to_error(e))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company_with_calendar(calendar_id: Option<&str>) -> Company {
        let mut company = Company::new(
            "Hundgruppen AB".to_string(),
            "5560360793".to_string(),
            None,
        );
        company.external_calendar_id = calendar_id.map(|s| s.to_string());
        company
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_plan_skips_when_identifier_unchanged_on_update() {
        let company = company_with_calendar(Some("cal-123"));
        assert_eq!(plan_sync(&company, false, true, today()), SyncPlan::Skip);
    }

    #[test]
    fn test_plan_runs_when_identifier_changed_on_update() {
        let company = company_with_calendar(Some("cal-123"));
        assert_eq!(
            plan_sync(&company, true, true, today()),
            SyncPlan::ClearAndImport {
                start_date: NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
            }
        );
    }

    #[test]
    fn test_plan_clears_only_for_blank_identifier() {
        // blank identifier clears events without calling the importer
        assert_eq!(
            plan_sync(&company_with_calendar(None), true, false, today()),
            SyncPlan::ClearOnly
        );
        assert_eq!(
            plan_sync(&company_with_calendar(Some("   ")), true, true, today()),
            SyncPlan::ClearOnly
        );
    }

    #[test]
    fn test_plan_start_date_is_yesterday() {
        let company = company_with_calendar(Some("cal-123"));
        match plan_sync(&company, true, false, today()) {
            SyncPlan::ClearAndImport { start_date } => {
                assert_eq!(start_date, today() - Duration::days(1));
            }
            other => panic!("expected import plan, got {:?}", other),
        }
    }

    #[test]
    fn test_import_failures_become_field_errors() {
        let err = import_failure_to_error(ImportError::InvalidKey);
        match err {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                assert_eq!(fields["external_calendar_id"][0].code, "invalid");
            }
            other => panic!("expected validation error, got {:?}", other),
        }

        let err = import_failure_to_error(ImportError::InvalidCharacters);
        match err {
            AppError::Validation(errors) => {
                let fields = errors.field_errors();
                assert_eq!(fields["external_calendar_id"][0].code, "invalid_characters");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_other_import_failures_propagate() {
        let err = import_failure_to_error(ImportError::Other(anyhow::anyhow!("provider down")));
        match err {
            AppError::ExternalApi(msg) => assert!(msg.contains("provider down")),
            other => panic!("expected external API error, got {:?}", other),
        }
    }
}
