//! Thread-safe in-memory store adapters
//!
//! This module backs the [`AccountStore`] and [`LedgerStore`] seams with
//! `DashMap`-based implementations for the CLI and tests. DashMap's
//! fine-grained locking lets the pipeline's per-account fan-out touch
//! different keys concurrently without a global lock.
//!
//! Reads hand out clones: a returned account or entry is a snapshot at call
//! time. Updates are last-write-wins with no version token, which is the
//! documented consistency gap under concurrent bulk requests that target
//! the same account.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::core::traits::{AccountStore, LedgerStore};
use crate::types::{Account, AccountId, FeeFineError, LedgerEntry};

/// In-memory account store keyed by account identifier
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: DashMap<AccountId, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Seed one account (fixture loading; accounts are created externally)
    pub fn insert(&self, account: Account) {
        self.accounts.insert(account.id.clone(), account);
    }

    /// Snapshot of all accounts, sorted by identifier for stable output
    pub fn all_sorted(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        accounts
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Account>, FeeFineError> {
        Ok(self.accounts.get(id).map(|entry| entry.value().clone()))
    }

    async fn get_many_with_absent(
        &self,
        ids: &[AccountId],
    ) -> Result<Vec<(AccountId, Option<Account>)>, FeeFineError> {
        Ok(ids
            .iter()
            .map(|id| {
                let account = self.accounts.get(id).map(|entry| entry.value().clone());
                (id.clone(), account)
            })
            .collect())
    }

    async fn update(&self, account: &Account) -> Result<(), FeeFineError> {
        self.accounts
            .insert(account.id.clone(), account.clone());
        Ok(())
    }
}

/// In-memory append-only ledger keyed by entry identifier
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    entries: DashMap<String, LedgerEntry>,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Snapshot of all entries, sorted by timestamp then identifier
    pub fn all_sorted(&self) -> Vec<LedgerEntry> {
        let mut entries: Vec<LedgerEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by(|a, b| {
            a.date_action
                .cmp(&b.date_action)
                .then_with(|| a.id.cmp(&b.id))
        });
        entries
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    async fn append(&self, entry: &LedgerEntry) -> Result<(), FeeFineError> {
        if self.entries.contains_key(&entry.id) {
            return Err(FeeFineError::duplicate_entry(&entry.id));
        }
        self.entries.insert(entry.id.clone(), entry.clone());
        Ok(())
    }

    async fn find_by_account(
        &self,
        account_id: &str,
    ) -> Result<Vec<LedgerEntry>, FeeFineError> {
        if account_id.is_empty() {
            return Err(FeeFineError::EmptyAccountId);
        }

        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.value().account_id == account_id)
            .map(|entry| entry.value().clone())
            .collect())
    }
}
