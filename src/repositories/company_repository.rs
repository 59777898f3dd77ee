//! Company persistence
//!
//! Loads and saves companies, loads the full association graph for the
//! rules engine, and expresses the collection scopes as SQL. The SQL scopes
//! are the query-side twins of the in-memory filters in
//! `services::company_rules`; both must select the same companies.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::address::Address;
use crate::models::application::{Application, ApplicationState};
use crate::models::business_category::BusinessCategory;
use crate::models::company::Company;
use crate::models::event::Event;
use crate::models::payment::Payment;
use crate::models::picture::Picture;
use crate::models::user::User;
use crate::services::company_rules::CompanyAggregate;
use crate::utils::errors::{destroy_blocked_error, AppError};

pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, company: &Company) -> Result<Company, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, name, company_number, email, website, description,
                external_calendar_id, short_h_brand_url, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.company_number)
        .bind(&company.email)
        .bind(&company.website)
        .bind(&company.description)
        .bind(&company.external_calendar_id)
        .bind(&company.short_h_brand_url)
        .bind(company.created_at)
        .bind(company.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn company_number_exists(
        &self,
        company_number: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM companies
                WHERE company_number = $1 AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(company_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(&self, company: &Company) -> Result<Company, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, company_number = $3, email = $4, website = $5,
                description = $6, external_calendar_id = $7,
                short_h_brand_url = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.company_number)
        .bind(&company.email)
        .bind(&company.website)
        .bind(&company.description)
        .bind(&company.external_calendar_id)
        .bind(&company.short_h_brand_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Store the memoized short branding URL without touching other fields.
    pub async fn store_short_brand_url(&self, id: Uuid, short_url: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE companies SET short_h_brand_url = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(short_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Load the full association graph for one company.
    pub async fn load_aggregate(&self, id: Uuid) -> Result<Option<CompanyAggregate>, AppError> {
        let company = match self.find_by_id(id).await? {
            Some(company) => company,
            None => return Ok(None),
        };

        let addresses = sqlx::query_as::<_, Address>(
            r#"
            SELECT * FROM addresses
            WHERE addressable_type = 'Company' AND addressable_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let payments =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE company_id = $1")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        let applications =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE company_id = $1")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT DISTINCT u.* FROM users u
            JOIN applications a ON a.user_id = u.id
            WHERE a.company_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let categories = sqlx::query_as::<_, BusinessCategory>(
            r#"
            SELECT DISTINCT bc.* FROM business_categories bc
            JOIN application_categories ac ON ac.category_id = bc.id
            JOIN applications a ON a.id = ac.application_id
            WHERE a.company_id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE company_id = $1 ORDER BY start_date",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let pictures =
            sqlx::query_as::<_, Picture>("SELECT * FROM pictures WHERE company_id = $1")
                .bind(id)
                .fetch_all(&self.pool)
                .await?;

        Ok(Some(CompanyAggregate {
            company,
            addresses,
            payments,
            applications,
            users,
            categories,
            events,
            pictures,
        }))
    }

    /// Companies with a non-blank name and no address missing a region.
    pub async fn information_complete(&self) -> Result<Vec<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            SELECT DISTINCT c.* FROM companies c
            WHERE btrim(c.name) <> ''
              AND NOT EXISTS (
                  SELECT 1 FROM addresses a
                  WHERE a.addressable_type = 'Company' AND a.addressable_id = c.id
                    AND (a.region IS NULL OR btrim(a.region) = '')
              )
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Companies with at least one completed, unexpired branding-fee payment.
    pub async fn branding_license_current(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            SELECT DISTINCT c.* FROM companies c
            WHERE EXISTS (
                SELECT 1 FROM payments p
                WHERE p.company_id = c.id
                  AND p.payment_type = 'branding_fee'
                  AND p.status = 'completed'
                  AND (p.expire_date IS NULL OR p.expire_date > $1)
            )
            ORDER BY c.name
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Companies with at least one address whose visibility is not `none`.
    pub async fn with_visible_address(&self) -> Result<Vec<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            SELECT DISTINCT c.* FROM companies c
            WHERE EXISTS (
                SELECT 1 FROM addresses a
                WHERE a.addressable_type = 'Company' AND a.addressable_id = c.id
                  AND a.visibility <> 'none'
            )
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Companies backed by at least one accepted application from a current
    /// member.
    pub async fn member_backed(&self, today: NaiveDate) -> Result<Vec<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            SELECT DISTINCT c.* FROM companies c
            WHERE EXISTS (
                SELECT 1 FROM applications app
                JOIN users u ON u.id = app.user_id
                WHERE app.company_id = c.id
                  AND app.state = 'accepted'
                  AND u.member
                  AND u.membership_expire_date >= $1
            )
            ORDER BY c.name
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Publicly searchable companies: complete, member-backed and
    /// branding-licensed. Composition of the three scopes above.
    pub async fn searchable(&self, today: NaiveDate) -> Result<Vec<Company>, AppError> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            SELECT DISTINCT c.* FROM companies c
            WHERE btrim(c.name) <> ''
              AND NOT EXISTS (
                  SELECT 1 FROM addresses a
                  WHERE a.addressable_type = 'Company' AND a.addressable_id = c.id
                    AND (a.region IS NULL OR btrim(a.region) = '')
              )
              AND EXISTS (
                  SELECT 1 FROM payments p
                  WHERE p.company_id = c.id
                    AND p.payment_type = 'branding_fee'
                    AND p.status = 'completed'
                    AND (p.expire_date IS NULL OR p.expire_date > $1)
              )
              AND EXISTS (
                  SELECT 1 FROM applications app
                  JOIN users u ON u.id = app.user_id
                  WHERE app.company_id = c.id
                    AND app.state = 'accepted'
                    AND u.member
                    AND u.membership_expire_date >= $1
              )
            ORDER BY c.name
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    /// Guarded cascade destroy. Application states are re-read inside the
    /// transaction, never trusted from memory: any application not already
    /// mid-destruction blocks the whole operation.
    pub async fn destroy(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let states: Vec<(ApplicationState,)> = sqlx::query_as(
            "SELECT state FROM applications WHERE company_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        if states
            .iter()
            .any(|(state,)| *state != ApplicationState::BeingDestroyed)
        {
            tx.rollback().await?;
            return Err(destroy_blocked_error());
        }

        sqlx::query(
            r#"
            DELETE FROM application_categories
            WHERE application_id IN (SELECT id FROM applications WHERE company_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM applications WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM events WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM payments WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM addresses WHERE addressable_type = 'Company' AND addressable_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM pictures WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        log::info!("company {} destroyed with owned collections", id);
        Ok(())
    }
}
