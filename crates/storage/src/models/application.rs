use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Waitlisted,
    Rejected,
    Confirmed,
    Declined,
}

impl ApplicationStatus {
    /// Whether this status is an applicant decision on an accepted spot.
    pub fn is_decision(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Confirmed | ApplicationStatus::Declined
        )
    }

    /// The application lifecycle: admins move PENDING (or WAITLISTED)
    /// applications to a verdict, and only an ACCEPTED application can be
    /// confirmed or declined by its owner. CONFIRMED and DECLINED are
    /// terminal.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        match self {
            Pending => matches!(next, Accepted | Waitlisted | Rejected),
            Waitlisted => matches!(next, Accepted | Rejected),
            Accepted => matches!(next, Confirmed | Declined),
            Rejected | Confirmed | Declined => false,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Waitlisted => "WAITLISTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Confirmed => "CONFIRMED",
            ApplicationStatus::Declined => "DECLINED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: Uuid,
    pub identity_id: Uuid,
    pub application_year: i32,
    pub status: ApplicationStatus,
    pub resume_path: Option<String>,
    pub age: i32,
    pub gender: Option<String>,
    pub pronouns: Option<String>,
    pub ethnicity: Option<String>,
    pub grad_year: i32,
    pub phone_number: String,
    pub school: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub education_level: String,
    pub major: Option<String>,
    pub diet: Option<String>,
    pub shirt_size: Option<String>,
    pub sleep: Option<bool>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub motivation: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Application {
    pub fn owned_by(&self, identity_id: Uuid) -> bool {
        self.identity_id == identity_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_moves_to_admin_verdicts_only() {
        use ApplicationStatus::*;
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Waitlisted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(Declined));
    }

    #[test]
    fn only_accepted_can_be_confirmed_or_declined() {
        use ApplicationStatus::*;
        assert!(Accepted.can_transition_to(Confirmed));
        assert!(Accepted.can_transition_to(Declined));
        assert!(!Waitlisted.can_transition_to(Confirmed));
        assert!(!Rejected.can_transition_to(Confirmed));
        assert!(!Pending.can_transition_to(Declined));
    }

    #[test]
    fn decisions_are_terminal() {
        use ApplicationStatus::*;
        for next in [Pending, Accepted, Waitlisted, Rejected, Confirmed, Declined] {
            assert!(!Confirmed.can_transition_to(next));
            assert!(!Declined.can_transition_to(next));
        }
    }
}
