//! User model
//!
//! Only the membership-status slice of a user matters to the company rules:
//! whether the membership is currently active and when it started.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub member: bool,
    pub membership_number: Option<String>,
    pub membership_start_date: Option<NaiveDate>,
    pub membership_expire_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Membership is current when the member flag is set and the expiry
    /// date is today or later. No expiry date means no active membership.
    pub fn membership_current(&self, today: NaiveDate) -> bool {
        self.member
            && self
                .membership_expire_date
                .map(|d| d >= today)
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(member: bool, expire: Option<NaiveDate>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "medlem@example.se".to_string(),
            member,
            membership_number: Some("1001".to_string()),
            membership_start_date: Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()),
            membership_expire_date: expire,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_membership_current() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert!(user(true, Some(future)).membership_current(today));
        // expiry on the very day still counts
        assert!(user(true, Some(today)).membership_current(today));
        assert!(!user(true, Some(past)).membership_current(today));
        assert!(!user(true, None).membership_current(today));
        assert!(!user(false, Some(future)).membership_current(today));
    }
}
