//! Bulk action request and result types
//!
//! A `BulkActionRequest` carries everything the orchestrator needs to apply
//! one action type across one or more accounts with a single total amount.
//! The requested amount stays a string until validation so that failures can
//! echo the original text back unchanged.

use super::account::{Account, AccountId};
use super::action::LedgerEntry;
use super::money::MonetaryValue;
use serde::{Deserialize, Serialize};

/// A request to apply one monetary action across a set of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkActionRequest {
    /// Target account identifiers, in the order allocations are preferred
    pub account_ids: Vec<AccountId>,

    /// Requested total amount as decimal text, distributed across accounts
    pub amount: String,

    /// Free-text staff comment copied to every created ledger entry
    pub comments: Option<String>,

    /// Whether to dispatch a patron notice per created ledger entry
    pub notify_patron: bool,

    /// Payment method, when applicable to the action type
    pub payment_method: Option<String>,

    /// External transaction metadata
    pub transaction_info: Option<String>,

    /// Label of the servicing point
    pub service_point_id: Option<String>,

    /// Acting user or service name
    pub user_name: Option<String>,
}

impl BulkActionRequest {
    /// Minimal request with the given targets and amount
    pub fn new(account_ids: Vec<AccountId>, amount: impl Into<String>) -> Self {
        BulkActionRequest {
            account_ids,
            amount: amount.into(),
            comments: None,
            notify_patron: false,
            payment_method: None,
            transaction_info: None,
            service_point_id: None,
            user_name: None,
        }
    }
}

/// Result of a completed bulk action
///
/// Exposes the final mutated accounts and the ledger entries created for
/// them, in the request's account order.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkActionOutcome {
    pub accounts: Vec<Account>,
    pub entries: Vec<LedgerEntry>,
}

/// Result of a successful dry-run action check
///
/// `amount` echoes the requested text verbatim; `remaining` is the total
/// actionable amount that would be left after the hypothetical action
/// (remaining balances for default actions, refundable total for refunds).
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub amount: String,
    pub remaining: MonetaryValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_has_no_optional_fields() {
        let request = BulkActionRequest::new(vec!["acc-1".to_string()], "4.00");

        assert_eq!(request.account_ids, vec!["acc-1".to_string()]);
        assert_eq!(request.amount, "4.00");
        assert!(request.comments.is_none());
        assert!(!request.notify_patron);
        assert!(request.payment_method.is_none());
    }
}
