//! Business category model
//!
//! Categories reach a company transitively: each application selects one or
//! more categories, and the company's category list is the union over its
//! applications.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BusinessCategory {
    pub id: Uuid,
    pub name: String,
}
