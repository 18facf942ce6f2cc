//! Account-related types
//!
//! This module defines the `Account` structure representing one patron's
//! outstanding fee/fine obligation, together with its open/closed status.

use super::money::MonetaryValue;
use serde::{Deserialize, Serialize};

/// Opaque account identifier
pub type AccountId = String;

/// Opaque identifier of the patron owning an account
pub type UserId = String;

/// Open/closed status of a fee/fine account
///
/// An account transitions to `Closed` when an action brings its remaining
/// balance to exactly zero. An action never closes an account that still
/// carries a positive balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeFineStatus {
    Open,
    Closed,
}

impl FeeFineStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FeeFineStatus::Open => "Open",
            FeeFineStatus::Closed => "Closed",
        }
    }
}

/// One patron's outstanding fee/fine obligation
///
/// The remaining balance is mutated in place by bulk actions; the account is
/// created externally and never deleted by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Opaque account identifier
    pub id: AccountId,

    /// The patron this obligation belongs to
    pub user_id: UserId,

    /// Remaining balance, always non-negative for accounts at rest
    pub remaining: MonetaryValue,

    /// Open/closed status
    pub status: FeeFineStatus,

    /// Free-text label reflecting the last action type applied
    /// (e.g. "Outstanding", "Paid partially", "Waived fully")
    pub payment_status: String,
}

impl Account {
    /// Create a new open account with an outstanding balance
    pub fn new(
        id: impl Into<AccountId>,
        user_id: impl Into<UserId>,
        remaining: MonetaryValue,
    ) -> Self {
        Account {
            id: id.into(),
            user_id: user_id.into(),
            remaining,
            status: FeeFineStatus::Open,
            payment_status: "Outstanding".to_string(),
        }
    }

    /// `true` if the account has been closed
    pub fn is_closed(&self) -> bool {
        self.status == FeeFineStatus::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_open_and_outstanding() {
        let account = Account::new("acc-1", "user-1", "4.55".parse().unwrap());

        assert_eq!(account.id, "acc-1");
        assert_eq!(account.user_id, "user-1");
        assert_eq!(account.remaining.to_string(), "4.55");
        assert_eq!(account.status, FeeFineStatus::Open);
        assert_eq!(account.payment_status, "Outstanding");
        assert!(!account.is_closed());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(FeeFineStatus::Open.as_str(), "Open");
        assert_eq!(FeeFineStatus::Closed.as_str(), "Closed");
    }
}
