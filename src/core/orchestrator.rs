//! Bulk action orchestration
//!
//! This module provides the `BulkActionOrchestrator`, which composes account
//! lookup, validation, amount distribution, ledger recording and account
//! persistence into the five-stage pipeline behind every bulk monetary
//! action:
//!
//! 1. **Locate accounts** - resolve every requested identifier, retaining
//!    unresolved ones as explicit absent markers
//! 2. **Validate** - run the action-specific validation chain; carries the
//!    parsed requested amount forward
//! 3. **Allocate & record** - distribute the amount across accounts, build
//!    one ledger entry per account and append them to the ledger
//! 4. **Persist** - write every mutated account back to the account store
//! 5. **Notify** - dispatch one patron notice per created entry when asked;
//!    dispatch failures are logged and never fail the action
//!
//! A stage failure halts the pipeline and is surfaced directly; no later
//! stage executes. Stages 3 and 4 fan out per account and join before the
//! next stage begins, so there is no cross-account atomicity: when one
//! account's write fails, sibling accounts of the same request may already
//! have been persisted.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::context::ActionContext;
use crate::core::splitter::{AmountSplitter, SplitEvenlyRecursively};
use crate::core::traits::{AccountStore, LedgerStore, NoticeDispatcher};
use crate::core::validation::{
    ActionValidation, DefaultActionValidation, RefundActionValidation,
};
use crate::types::{
    Account, AccountId, ActionType, BulkActionOutcome, BulkActionRequest, CheckOutcome,
    FeeFineError, FeeFineStatus, LedgerEntry, MonetaryValue,
};

/// Orchestrates one action type's bulk pipeline over a set of stores
///
/// The validation variant and the distribution strategy are fixed at
/// construction time: refunds get `RefundActionValidation`, every other
/// action type gets `DefaultActionValidation`.
pub struct BulkActionOrchestrator {
    action: ActionType,
    accounts: Arc<dyn AccountStore>,
    ledger: Arc<dyn LedgerStore>,
    notices: Arc<dyn NoticeDispatcher>,
    validation: Arc<dyn ActionValidation>,
    splitter: Box<dyn AmountSplitter>,
}

impl BulkActionOrchestrator {
    /// Create an orchestrator for the given action type
    pub fn new(
        action: ActionType,
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        notices: Arc<dyn NoticeDispatcher>,
    ) -> Self {
        let validation: Arc<dyn ActionValidation> = match action {
            ActionType::Refund => Arc::new(RefundActionValidation::new(ledger.clone())),
            _ => Arc::new(DefaultActionValidation),
        };

        BulkActionOrchestrator {
            action,
            accounts,
            ledger,
            notices,
            validation,
            splitter: Box::new(SplitEvenlyRecursively),
        }
    }

    /// Orchestrator for bulk payments
    pub fn pay(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        notices: Arc<dyn NoticeDispatcher>,
    ) -> Self {
        Self::new(ActionType::Pay, accounts, ledger, notices)
    }

    /// Orchestrator for bulk waives
    pub fn waive(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        notices: Arc<dyn NoticeDispatcher>,
    ) -> Self {
        Self::new(ActionType::Waive, accounts, ledger, notices)
    }

    /// Orchestrator for bulk transfers
    pub fn transfer(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        notices: Arc<dyn NoticeDispatcher>,
    ) -> Self {
        Self::new(ActionType::Transfer, accounts, ledger, notices)
    }

    /// Orchestrator for bulk refunds
    pub fn refund(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        notices: Arc<dyn NoticeDispatcher>,
    ) -> Self {
        Self::new(ActionType::Refund, accounts, ledger, notices)
    }

    /// Orchestrator for bulk cancellations
    pub fn cancel(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<dyn LedgerStore>,
        notices: Arc<dyn NoticeDispatcher>,
    ) -> Self {
        Self::new(ActionType::Cancel, accounts, ledger, notices)
    }

    /// Run the full pipeline for one bulk action request
    ///
    /// On success, returns the mutated accounts and the ledger entries
    /// created for them. On failure, the error's
    /// [`kind`](FeeFineError::kind) tells the caller whether any mutation
    /// may have happened: malformed-input, validation and not-found
    /// failures are pure; a persistence failure may leave a subset of the
    /// request's accounts already updated.
    pub async fn perform(
        &self,
        request: BulkActionRequest,
    ) -> Result<BulkActionOutcome, FeeFineError> {
        // Malformed input is reported before any account lookup
        if request.amount.parse::<MonetaryValue>().is_err() {
            return Err(FeeFineError::invalid_amount(&request.amount));
        }

        let context = ActionContext::new(self.action, request);
        let context = self.find_accounts(context).await?;
        let (context, amount) = self.validate(context).await?;
        let context = self.create_ledger_entries(context, amount).await?;
        let context = self.update_accounts(context).await?;
        let context = self.send_patron_notices(context).await;

        info!(
            action = ?self.action,
            amount = %amount,
            accounts = context.entries().len(),
            "bulk action completed"
        );

        Ok(context.into_outcome())
    }

    /// Dry-run validation for this orchestrator's action type
    ///
    /// Locates the accounts and runs the same validation chain as
    /// [`perform`](Self::perform) without mutating anything; on success
    /// reports the actionable amount that would remain afterwards.
    pub async fn check(
        &self,
        account_ids: &[AccountId],
        amount: &str,
    ) -> Result<CheckOutcome, FeeFineError> {
        if amount.parse::<MonetaryValue>().is_err() {
            return Err(FeeFineError::invalid_amount(amount));
        }

        let resolved = self.accounts.get_many_with_absent(account_ids).await?;
        self.validation.check(&resolved, amount).await
    }

    /// Stage 1: resolve requested identifiers, keeping absent markers
    async fn find_accounts(
        &self,
        context: ActionContext,
    ) -> Result<ActionContext, FeeFineError> {
        let ids = context.request().account_ids.clone();
        let resolved = self.accounts.get_many_with_absent(&ids).await?;

        Ok(context.with_accounts(resolved))
    }

    /// Stage 2: run the action-specific validation chain
    async fn validate(
        &self,
        context: ActionContext,
    ) -> Result<(ActionContext, MonetaryValue), FeeFineError> {
        let amount = self
            .validation
            .validate(context.accounts(), &context.request().amount)
            .await?;

        Ok((context.with_requested_amount(amount), amount))
    }

    /// Stage 3: distribute the amount, build and append one entry per account
    async fn create_ledger_entries(
        &self,
        context: ActionContext,
        requested: MonetaryValue,
    ) -> Result<ActionContext, FeeFineError> {
        let accounts = context.present_accounts();

        let caps = future::try_join_all(
            accounts
                .iter()
                .map(|account| self.validation.actionable_amount(account)),
        )
        .await?;
        let actionable: HashMap<AccountId, MonetaryValue> = accounts
            .iter()
            .map(|account| account.id.clone())
            .zip(caps)
            .collect();

        let allocations = self.splitter.split(requested, &accounts, &actionable);

        let mut entries = Vec::with_capacity(accounts.len());
        let mut updated = Vec::with_capacity(accounts.len());
        for account in &accounts {
            let amount = allocations
                .get(&account.id)
                .copied()
                .unwrap_or_else(MonetaryValue::zero);
            let (entry, after) = self.apply_action(account, amount, context.request());
            entries.push(entry);
            updated.push(after);
        }

        future::try_join_all(entries.iter().map(|entry| self.ledger.append(entry))).await?;

        Ok(context.with_entries(entries).with_updated_accounts(updated))
    }

    /// Build the ledger entry and the mutated account for one allocation
    ///
    /// The entry's resulting-balance field and the account mutation are
    /// computed together so they always agree: exact zero resolves to the
    /// action's full label and closes the account; anything else resolves
    /// to the partial label with the remainder as the new balance.
    fn apply_action(
        &self,
        account: &Account,
        amount: MonetaryValue,
        request: &BulkActionRequest,
    ) -> (LedgerEntry, Account) {
        let balance = account.remaining.subtract(amount);
        let is_full = balance.is_zero();
        let type_action = if is_full {
            self.action.full_result()
        } else {
            self.action.partial_result()
        };

        let entry = LedgerEntry {
            id: Uuid::new_v4().to_string(),
            account_id: account.id.clone(),
            user_id: account.user_id.clone(),
            amount,
            balance,
            type_action: type_action.to_string(),
            comments: request.comments.clone(),
            payment_method: request.payment_method.clone(),
            notify: request.notify_patron,
            date_action: Utc::now(),
            created_at: request.service_point_id.clone(),
            source: request.user_name.clone(),
            transaction_information: request.transaction_info.clone(),
        };

        let mut after = account.clone();
        after.payment_status = type_action.to_string();
        if is_full {
            after.status = FeeFineStatus::Closed;
            after.remaining = MonetaryValue::zero();
        } else {
            after.remaining = balance;
        }

        (entry, after)
    }

    /// Stage 4: persist mutated accounts as independent joined writes
    async fn update_accounts(
        &self,
        context: ActionContext,
    ) -> Result<ActionContext, FeeFineError> {
        let updated = context.present_accounts();
        future::try_join_all(updated.iter().map(|account| self.accounts.update(account)))
            .await?;

        Ok(context)
    }

    /// Stage 5: dispatch notices; failures are logged, never propagated
    async fn send_patron_notices(&self, context: ActionContext) -> ActionContext {
        if context.request().notify_patron {
            for entry in context.entries() {
                if let Err(error) = self.notices.send_for_entry(entry).await {
                    warn!(
                        entry_id = %entry.id,
                        account_id = %entry.account_id,
                        %error,
                        "patron notice dispatch failed"
                    );
                }
            }
        }

        context
    }
}
