//! Membership application model
//!
//! An application links a user to a company. Only `accepted` applications
//! back the company's member-related rules. `being_destroyed` is a
//! transitional state entered exclusively through
//! `ApplicationRepository::mark_being_destroyed`, when the applicant's own
//! cascade deletion has begun; applications in that state no longer block
//! company destruction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationState {
    New,
    UnderReview,
    Accepted,
    Rejected,
    BeingDestroyed,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub state: ApplicationState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn accepted(&self) -> bool {
        self.state == ApplicationState::Accepted
    }

    /// Any application not already mid-destruction blocks company deletion.
    pub fn blocks_destroy(&self) -> bool {
        self.state != ApplicationState::BeingDestroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn application(state: ApplicationState) -> Application {
        Application {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            state,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_blocks_destroy() {
        assert!(application(ApplicationState::New).blocks_destroy());
        assert!(application(ApplicationState::UnderReview).blocks_destroy());
        assert!(application(ApplicationState::Accepted).blocks_destroy());
        assert!(application(ApplicationState::Rejected).blocks_destroy());
        assert!(!application(ApplicationState::BeingDestroyed).blocks_destroy());
    }

    #[test]
    fn test_accepted() {
        assert!(application(ApplicationState::Accepted).accepted());
        assert!(!application(ApplicationState::UnderReview).accepted());
    }
}
