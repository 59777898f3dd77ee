//! Payment model
//!
//! Payments carry a type tag (membership fee or branding fee), a completion
//! status and an optional expiry date. An absent expiry date means the
//! payment never expires.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    MembershipFee,
    BrandingFee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Created,
    Pending,
    Completed,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Option<Uuid>,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub start_date: NaiveDate,
    pub expire_date: Option<NaiveDate>,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// A payment is current when it is completed and its expiry is absent
    /// (perpetual) or strictly after today.
    pub fn current(&self, today: NaiveDate) -> bool {
        self.status == PaymentStatus::Completed
            && self.expire_date.map(|d| d > today).unwrap_or(true)
    }

    pub fn branding_fee(&self) -> bool {
        self.payment_type == PaymentType::BrandingFee
    }
}
