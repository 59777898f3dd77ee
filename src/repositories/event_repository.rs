//! Event persistence
//!
//! The event sync clears and repopulates a company's events inside one
//! transaction, so the write operations take the transaction directly.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::event::Event;
use crate::utils::errors::AppError;

pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Event>, AppError> {
        let result = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE company_id = $1 ORDER BY start_date",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete_for_company(
        tx: &mut Transaction<'_, Postgres>,
        company_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM events WHERE company_id = $1")
            .bind(company_id)
            .execute(&mut **tx)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        event: &Event,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO events (id, company_id, name, start_date, location, external_key, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.id)
        .bind(event.company_id)
        .bind(&event.name)
        .bind(event.start_date)
        .bind(&event.location)
        .bind(&event.external_key)
        .bind(event.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
