//! Error types for the fee/fine bulk action engine
//!
//! This module defines all errors the action pipeline can surface. Error
//! messages for validation failures match the wording the transport layer
//! exposes to staff clients, and every validation variant carries the
//! original requested-amount text so it can be echoed back unchanged.
//!
//! # Error Categories
//!
//! - **Malformed input**: the requested amount does not parse as a decimal
//! - **Validation failures**: non-positive amount, closed account, amount
//!   exceeding the action's maximum
//! - **Not found**: one or more requested accounts do not exist
//! - **Persistence failures**: store operations that fail after validation

use thiserror::Error;

use super::account::AccountId;

/// Coarse classification of a pipeline failure for the transport contract
///
/// Distinguishes the outcomes the caller must map differently: malformed
/// input and validation failures are pure (no mutation has happened), a
/// not-found maps to a resource-missing outcome, and a persistence failure
/// may leave sibling accounts partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MalformedInput,
    Validation,
    NotFound,
    Persistence,
}

/// Main error type for the bulk action engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeeFineError {
    /// The requested amount is not parseable as a decimal
    ///
    /// Reported before any account lookup is performed.
    #[error("Invalid amount entered")]
    InvalidAmount {
        /// The original requested-amount text
        amount: String,
    },

    /// The requested amount parsed but is zero or negative
    #[error("Amount must be positive")]
    AmountNotPositive {
        /// The original requested-amount text
        amount: String,
    },

    /// One or more requested accounts do not exist
    ///
    /// Distinct from a validation failure: maps to a resource-missing
    /// outcome. No mutation occurs.
    #[error("Fee/fine was not found")]
    AccountsNotFound {
        /// The identifiers that could not be resolved
        account_ids: Vec<AccountId>,
    },

    /// A non-refund action targeted an account that is already closed
    #[error("Fee/fine is already closed")]
    AccountClosed {
        /// The closed account
        account_id: AccountId,
    },

    /// The requested amount exceeds the targets' total remaining balance
    #[error("Requested amount exceeds remaining amount")]
    ExceedsRemaining {
        /// The original requested-amount text
        amount: String,
    },

    /// The requested refund exceeds the targets' total refundable amount
    #[error("Requested amount exceeds maximum refund amount")]
    ExceedsRefundable {
        /// The original requested-amount text
        amount: String,
    },

    /// A ledger entry with this identifier already exists
    ///
    /// Entry identifiers are generated by the orchestrator and must be
    /// globally unique; a collision is a storage-level failure.
    #[error("Ledger entry {id} already exists")]
    DuplicateEntry {
        /// The colliding entry identifier
        id: String,
    },

    /// A ledger query was issued with an empty account identifier
    ///
    /// A caller contract violation, not a business failure.
    #[error("Account ID is empty")]
    EmptyAccountId,

    /// A store operation failed
    #[error("Storage failure: {message}")]
    Storage {
        /// Description of the underlying failure
        message: String,
    },

    /// An I/O error occurred while reading or writing fixture files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// A CSV record could not be parsed
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl FeeFineError {
    /// Classify this error for the transport contract
    pub fn kind(&self) -> FailureKind {
        match self {
            FeeFineError::InvalidAmount { .. } => FailureKind::MalformedInput,
            FeeFineError::AmountNotPositive { .. }
            | FeeFineError::AccountClosed { .. }
            | FeeFineError::ExceedsRemaining { .. }
            | FeeFineError::ExceedsRefundable { .. } => FailureKind::Validation,
            FeeFineError::AccountsNotFound { .. } => FailureKind::NotFound,
            FeeFineError::DuplicateEntry { .. }
            | FeeFineError::EmptyAccountId
            | FeeFineError::Storage { .. }
            | FeeFineError::Io { .. }
            | FeeFineError::Csv { .. } => FailureKind::Persistence,
        }
    }

    /// The original requested-amount text, for failures that echo it
    pub fn requested_amount(&self) -> Option<&str> {
        match self {
            FeeFineError::InvalidAmount { amount }
            | FeeFineError::AmountNotPositive { amount }
            | FeeFineError::ExceedsRemaining { amount }
            | FeeFineError::ExceedsRefundable { amount } => Some(amount),
            _ => None,
        }
    }
}

// Helper functions for creating common errors

impl FeeFineError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        FeeFineError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an AmountNotPositive error
    pub fn amount_not_positive(amount: &str) -> Self {
        FeeFineError::AmountNotPositive {
            amount: amount.to_string(),
        }
    }

    /// Create an AccountsNotFound error
    pub fn accounts_not_found(account_ids: Vec<AccountId>) -> Self {
        FeeFineError::AccountsNotFound { account_ids }
    }

    /// Create an AccountClosed error
    pub fn account_closed(account_id: &str) -> Self {
        FeeFineError::AccountClosed {
            account_id: account_id.to_string(),
        }
    }

    /// Create an ExceedsRemaining error
    pub fn exceeds_remaining(amount: &str) -> Self {
        FeeFineError::ExceedsRemaining {
            amount: amount.to_string(),
        }
    }

    /// Create an ExceedsRefundable error
    pub fn exceeds_refundable(amount: &str) -> Self {
        FeeFineError::ExceedsRefundable {
            amount: amount.to_string(),
        }
    }

    /// Create a DuplicateEntry error
    pub fn duplicate_entry(id: &str) -> Self {
        FeeFineError::DuplicateEntry { id: id.to_string() }
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        FeeFineError::Storage {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for FeeFineError {
    fn from(error: std::io::Error) -> Self {
        FeeFineError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for FeeFineError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FeeFineError::Csv {
            line,
            message: error.to_string(),
        }
    }
}
