//! Application persistence
//!
//! Owns the one explicit transition into `being_destroyed`: it is invoked
//! by the applicant-account cascade, never set from request input.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::{Application, ApplicationState};
use crate::utils::errors::AppError;

pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Application>, AppError> {
        let result =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE company_id = $1")
                .bind(company_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(result)
    }

    /// Move an application into the transitional `being_destroyed` state.
    /// Called when the applicant's own deletion cascade has begun; from this
    /// point the application no longer blocks company destruction.
    pub async fn mark_being_destroyed(&self, application_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE applications SET state = $2, updated_at = now() WHERE id = $1")
            .bind(application_id)
            .bind(ApplicationState::BeingDestroyed)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
