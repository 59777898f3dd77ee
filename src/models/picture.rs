//! Company picture model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Picture {
    pub id: Uuid,
    pub company_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub created_at: DateTime<Utc>,
}
