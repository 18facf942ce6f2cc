//! Collaborator traits for account storage, the action ledger, and notices
//!
//! This module defines the trait seams between the bulk action pipeline and
//! its external collaborators. The pipeline only ever sees these traits; the
//! in-memory adapters in [`crate::store`] back them for the CLI and tests,
//! and a persistence engine can back them in a real deployment.

use async_trait::async_trait;

use crate::types::{Account, AccountId, FeeFineError, LedgerEntry};

/// Key-indexed store of fee/fine accounts
///
/// Accounts are created externally; the pipeline only reads and updates
/// them. `get_many_with_absent` retains unresolved identifiers as explicit
/// `None` markers, in request order, so that validation can produce a
/// not-found outcome instead of silently operating on fewer accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch one account by its identifier
    async fn get_by_id(&self, id: &str) -> Result<Option<Account>, FeeFineError>;

    /// Fetch many accounts, keeping absent ids as `None` markers
    ///
    /// The returned pairs preserve the order of `ids`.
    async fn get_many_with_absent(
        &self,
        ids: &[AccountId],
    ) -> Result<Vec<(AccountId, Option<Account>)>, FeeFineError>;

    /// Persist a mutated account
    async fn update(&self, account: &Account) -> Result<(), FeeFineError>;
}

/// Durable append-only record of ledger entries, queryable by account
///
/// The refundable and charge views are derived from `find_by_account`;
/// implementations may override them with indexed queries.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Append one entry, failing if its identifier already exists
    async fn append(&self, entry: &LedgerEntry) -> Result<(), FeeFineError>;

    /// All entries recorded against an account, in no guaranteed order
    ///
    /// Fails with [`FeeFineError::EmptyAccountId`] when called with an empty
    /// identifier (a caller contract violation).
    async fn find_by_account(&self, account_id: &str) -> Result<Vec<LedgerEntry>, FeeFineError>;

    /// Entries eligible to be refunded: prior Pay and Transfer actions
    async fn find_refundable(&self, account_id: &str) -> Result<Vec<LedgerEntry>, FeeFineError> {
        Ok(self
            .find_by_account(account_id)
            .await?
            .into_iter()
            .filter(LedgerEntry::is_refundable)
            .collect())
    }

    /// The entry representing the account's original charge, if any
    ///
    /// Accounts are expected to carry a single charge entry. Should more
    /// than one qualify, the earliest `date_action` wins, with the smaller
    /// id as the final tie-break, so repeated queries return the same entry.
    async fn find_charge(&self, account_id: &str) -> Result<Option<LedgerEntry>, FeeFineError> {
        Ok(self
            .find_by_account(account_id)
            .await?
            .into_iter()
            .filter(LedgerEntry::is_charge)
            .min_by(|a, b| {
                a.date_action
                    .cmp(&b.date_action)
                    .then_with(|| a.id.cmp(&b.id))
            }))
    }
}

/// Dispatcher for patron notices about created ledger entries
///
/// Delivery is a side effect decoupled from the financial outcome: the
/// pipeline logs dispatch failures and never propagates them.
#[async_trait]
pub trait NoticeDispatcher: Send + Sync {
    /// Dispatch one notice for a created ledger entry
    async fn send_for_entry(&self, entry: &LedgerEntry) -> Result<(), FeeFineError>;
}
