//! Per-invocation pipeline context
//!
//! One `ActionContext` value is threaded through the five pipeline stages of
//! a bulk action. Each stage consumes the context and returns a new one via
//! the `with_*` builders, so no stage ever observes a partially-updated
//! context and nothing is shared across requests.

use crate::types::{
    Account, AccountId, ActionType, BulkActionOutcome, BulkActionRequest, LedgerEntry,
    MonetaryValue,
};

/// Transient state of one bulk action invocation
///
/// Resolved accounts are kept in request order; identifiers that could not
/// be resolved stay present as `None` markers so validation can distinguish
/// a missing account from a shorter target list.
#[derive(Debug, Clone)]
pub struct ActionContext {
    action: ActionType,
    request: BulkActionRequest,
    accounts: Vec<(AccountId, Option<Account>)>,
    requested_amount: Option<MonetaryValue>,
    entries: Vec<LedgerEntry>,
}

impl ActionContext {
    pub fn new(action: ActionType, request: BulkActionRequest) -> Self {
        ActionContext {
            action,
            request,
            accounts: Vec::new(),
            requested_amount: None,
            entries: Vec::new(),
        }
    }

    /// Stage 1 result: the resolved account mapping, absent markers included
    pub fn with_accounts(mut self, accounts: Vec<(AccountId, Option<Account>)>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Stage 2 result: the validated, parsed requested amount
    pub fn with_requested_amount(mut self, amount: MonetaryValue) -> Self {
        self.requested_amount = Some(amount);
        self
    }

    /// Stage 3 result: the created ledger entries
    pub fn with_entries(mut self, entries: Vec<LedgerEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Stage 3 result: replace resolved accounts with their mutated states
    pub fn with_updated_accounts(mut self, updated: Vec<Account>) -> Self {
        for account in updated {
            if let Some(slot) = self
                .accounts
                .iter_mut()
                .find(|(id, _)| *id == account.id)
            {
                slot.1 = Some(account);
            }
        }
        self
    }

    pub fn action(&self) -> ActionType {
        self.action
    }

    pub fn request(&self) -> &BulkActionRequest {
        &self.request
    }

    pub fn accounts(&self) -> &[(AccountId, Option<Account>)] {
        &self.accounts
    }

    /// The resolved accounts, in request order, skipping absent markers
    pub fn present_accounts(&self) -> Vec<Account> {
        self.accounts
            .iter()
            .filter_map(|(_, account)| account.clone())
            .collect()
    }

    /// The validated amount; only available after stage 2
    pub fn requested_amount(&self) -> Option<MonetaryValue> {
        self.requested_amount
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Final pipeline result exposed to the transport layer
    pub fn into_outcome(self) -> BulkActionOutcome {
        let accounts = self
            .accounts
            .into_iter()
            .filter_map(|(_, account)| account)
            .collect();

        BulkActionOutcome {
            accounts,
            entries: self.entries,
        }
    }
}
