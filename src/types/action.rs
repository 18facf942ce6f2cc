//! Action types and ledger entries
//!
//! This module defines the monetary action types supported by the bulk
//! engine and the immutable `LedgerEntry` record created for each monetary
//! movement against an account.
//!
//! # Action result labels
//!
//! Every action resolves to a "full" or "partial" result label depending on
//! whether it brings the account's remaining balance to exactly zero. The
//! label is written to the ledger entry's `type_action` field and to the
//! account's `payment_status`. A ledger entry whose `type_action` matches
//! none of these labels is the account's original charge.

use super::account::{AccountId, UserId};
use super::money::MonetaryValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Monetary action types applicable to fee/fine accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Patron pays part or all of the remaining balance
    Pay,

    /// Staff waives part or all of the remaining balance
    Waive,

    /// The balance is transferred to another fee account
    Transfer,

    /// Previously paid or transferred money is returned to the patron
    ///
    /// Refunds are capped by the account's refundable history (prior Pay and
    /// Transfer entries), not by its live balance, and remain applicable to
    /// closed accounts.
    Refund,

    /// The fee/fine is cancelled as created in error
    Cancel,
}

impl ActionType {
    /// Label recorded when the action consumes the entire remaining balance
    pub fn full_result(self) -> &'static str {
        match self {
            ActionType::Pay => "Paid fully",
            ActionType::Waive => "Waived fully",
            ActionType::Transfer => "Transferred fully",
            ActionType::Refund => "Refunded fully",
            ActionType::Cancel => "Cancelled as error",
        }
    }

    /// Label recorded when a balance remains after the action
    pub fn partial_result(self) -> &'static str {
        match self {
            ActionType::Pay => "Paid partially",
            ActionType::Waive => "Waived partially",
            ActionType::Transfer => "Transferred partially",
            ActionType::Refund => "Refunded partially",
            ActionType::Cancel => "Cancelled as error",
        }
    }

    /// All action types
    pub fn all() -> [ActionType; 5] {
        [
            ActionType::Pay,
            ActionType::Waive,
            ActionType::Transfer,
            ActionType::Refund,
            ActionType::Cancel,
        ]
    }

    /// `true` if `label` is the full or partial result of any action type
    ///
    /// Entries carrying any other label are charges, not actions.
    pub fn is_action_result(label: &str) -> bool {
        ActionType::all()
            .iter()
            .any(|action| action.full_result() == label || action.partial_result() == label)
    }

    /// `true` if `label` is the full or partial result of this action type
    pub fn matches_label(self, label: &str) -> bool {
        self.full_result() == label || self.partial_result() == label
    }
}

/// Immutable record of one monetary movement against one account
///
/// Created only by the bulk action orchestrator; the `amount` and `balance`
/// fields are computed together at creation time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Globally unique entry identifier (UUID, generated by the orchestrator)
    pub id: String,

    /// The account this movement applies to
    pub account_id: AccountId,

    /// The patron owning the account
    pub user_id: UserId,

    /// Amount moved by this action
    pub amount: MonetaryValue,

    /// Account balance immediately after this movement
    pub balance: MonetaryValue,

    /// Resolved action label ("Paid partially", "Waived fully", ...) or the
    /// fee/fine type name for the original charge
    pub type_action: String,

    /// Free-text staff comment
    pub comments: Option<String>,

    /// Payment method used, when applicable
    pub payment_method: Option<String>,

    /// Whether the patron should be notified about this movement
    pub notify: bool,

    /// When the movement was recorded
    pub date_action: DateTime<Utc>,

    /// Label of the service point the action was performed at
    pub created_at: Option<String>,

    /// Acting user or service name
    pub source: Option<String>,

    /// External transaction metadata
    pub transaction_information: Option<String>,
}

impl LedgerEntry {
    /// `true` if this entry is eligible to be refunded (a Pay or Transfer)
    pub fn is_refundable(&self) -> bool {
        ActionType::Pay.matches_label(&self.type_action)
            || ActionType::Transfer.matches_label(&self.type_action)
    }

    /// `true` if this entry represents the account's original charge
    pub fn is_charge(&self) -> bool {
        !ActionType::is_action_result(&self.type_action)
    }
}
