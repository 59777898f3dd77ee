//! Address persistence

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::address::Address;
use crate::utils::errors::AppError;

pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, address: &Address) -> Result<Address, AppError> {
        let result = sqlx::query_as::<_, Address>(
            r#"
            INSERT INTO addresses (
                id, addressable_type, addressable_id, street_address, post_code,
                city, kommun, region, country, visibility, mail, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(address.id)
        .bind(&address.addressable_type)
        .bind(address.addressable_id)
        .bind(&address.street_address)
        .bind(&address.post_code)
        .bind(&address.city)
        .bind(&address.kommun)
        .bind(&address.region)
        .bind(&address.country)
        .bind(address.visibility)
        .bind(address.mail)
        .bind(address.created_at)
        .bind(address.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn list_for_company(&self, company_id: Uuid) -> Result<Vec<Address>, AppError> {
        let result = sqlx::query_as::<_, Address>(
            r#"
            SELECT * FROM addresses
            WHERE addressable_type = 'Company' AND addressable_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }
}
