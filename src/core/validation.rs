//! Action validation for bulk monetary actions
//!
//! This module gates the pipeline before any mutation occurs. Validation is
//! polymorphic over the action type: pay, waive, transfer and cancel share
//! the default rules (open accounts only, capped by the live remaining
//! balances), while refunds ignore account status and are capped by the
//! historical refundable amount instead.
//!
//! The shared `validate` driver runs its checks in a fixed order and
//! short-circuits on the first failure:
//!
//! 1. the requested amount parses as a decimal
//! 2. the parsed amount is strictly positive
//! 3. every requested account was resolved (absent markers fail as not-found)
//! 4. account statuses are eligible (variant-specific)
//! 5. the amount does not exceed the variant's maximum actionable amount
//!
//! Failures echo the original requested-amount text unchanged; no partial
//! validation state leaks to later stages.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future;

use crate::core::traits::LedgerStore;
use crate::types::{Account, AccountId, CheckOutcome, FeeFineError, MonetaryValue};

/// Validation rules for one family of action types
///
/// Implementations supply the variant-specific hooks; `validate` and `check`
/// drive the shared rule ordering. The orchestrator selects the
/// implementation once, at construction time, based on its action type.
#[async_trait]
pub trait ActionValidation: Send + Sync {
    /// Reject accounts whose status makes them ineligible for this action
    async fn check_statuses(&self, accounts: &[Account]) -> Result<(), FeeFineError>;

    /// The cap on how much may be applied to one account by this action
    async fn actionable_amount(&self, account: &Account) -> Result<MonetaryValue, FeeFineError>;

    /// The failure reported when the requested amount exceeds the maximum
    fn exceeded_error(&self, requested: &str) -> FeeFineError;

    /// Total actionable amount across all target accounts
    ///
    /// Per-account amounts are computed concurrently; refund validation
    /// issues one ledger query per account.
    async fn max_actionable(&self, accounts: &[Account]) -> Result<MonetaryValue, FeeFineError> {
        let amounts = future::try_join_all(
            accounts
                .iter()
                .map(|account| self.actionable_amount(account)),
        )
        .await?;

        Ok(amounts
            .into_iter()
            .fold(MonetaryValue::zero(), MonetaryValue::add))
    }

    /// Run all checks in order; on success returns the parsed amount
    async fn validate(
        &self,
        resolved: &[(AccountId, Option<Account>)],
        requested: &str,
    ) -> Result<MonetaryValue, FeeFineError> {
        let amount: MonetaryValue = requested
            .parse()
            .map_err(|_| FeeFineError::invalid_amount(requested))?;

        if !amount.is_positive() {
            return Err(FeeFineError::amount_not_positive(requested));
        }

        let missing: Vec<AccountId> = resolved
            .iter()
            .filter(|(_, account)| account.is_none())
            .map(|(id, _)| id.clone())
            .collect();
        if resolved.is_empty() || !missing.is_empty() {
            return Err(FeeFineError::accounts_not_found(missing));
        }

        let accounts: Vec<Account> = resolved
            .iter()
            .filter_map(|(_, account)| account.clone())
            .collect();

        self.check_statuses(&accounts).await?;

        let max = self.max_actionable(&accounts).await?;
        if amount.is_greater_than(max) {
            return Err(self.exceeded_error(requested));
        }

        Ok(amount)
    }

    /// Dry-run validation reporting the remaining actionable amount
    ///
    /// Validates exactly like [`ActionValidation::validate`] without
    /// mutating anything, and on success reports what would remain after
    /// the hypothetical action.
    async fn check(
        &self,
        resolved: &[(AccountId, Option<Account>)],
        requested: &str,
    ) -> Result<CheckOutcome, FeeFineError> {
        let amount = self.validate(resolved, requested).await?;

        let accounts: Vec<Account> = resolved
            .iter()
            .filter_map(|(_, account)| account.clone())
            .collect();
        let max = self.max_actionable(&accounts).await?;

        Ok(CheckOutcome {
            amount: requested.to_string(),
            remaining: max.subtract(amount),
        })
    }
}

/// Validation for pay, waive, transfer and cancel actions
///
/// Closed accounts are rejected; the maximum actionable amount is the sum
/// of the targets' live remaining balances.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultActionValidation;

#[async_trait]
impl ActionValidation for DefaultActionValidation {
    async fn check_statuses(&self, accounts: &[Account]) -> Result<(), FeeFineError> {
        match accounts.iter().find(|account| account.is_closed()) {
            Some(closed) => Err(FeeFineError::account_closed(&closed.id)),
            None => Ok(()),
        }
    }

    async fn actionable_amount(&self, account: &Account) -> Result<MonetaryValue, FeeFineError> {
        Ok(account.remaining)
    }

    fn exceeded_error(&self, requested: &str) -> FeeFineError {
        FeeFineError::exceeds_remaining(requested)
    }
}

/// Validation for refund actions
///
/// Closed fee/fines can also be refunded, so the status check passes
/// everything. The cap is the account's refundable amount: the sum of its
/// prior Pay and Transfer ledger entries, queried from history rather than
/// read from the live balance.
pub struct RefundActionValidation {
    ledger: Arc<dyn LedgerStore>,
}

impl RefundActionValidation {
    pub fn new(ledger: Arc<dyn LedgerStore>) -> Self {
        RefundActionValidation { ledger }
    }
}

#[async_trait]
impl ActionValidation for RefundActionValidation {
    async fn check_statuses(&self, _accounts: &[Account]) -> Result<(), FeeFineError> {
        Ok(())
    }

    async fn actionable_amount(&self, account: &Account) -> Result<MonetaryValue, FeeFineError> {
        let refundable = self.ledger.find_refundable(&account.id).await?;

        Ok(refundable
            .iter()
            .map(|entry| entry.amount)
            .fold(MonetaryValue::zero(), MonetaryValue::add))
    }

    fn exceeded_error(&self, requested: &str) -> FeeFineError {
        FeeFineError::exceeds_refundable(requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryLedgerStore;
    use crate::types::{FeeFineStatus, LedgerEntry};
    use chrono::Utc;
    use rstest::rstest;

    fn money(s: &str) -> MonetaryValue {
        s.parse().unwrap()
    }

    fn account(id: &str, remaining: &str) -> Account {
        Account::new(id, "user-1", money(remaining))
    }

    fn closed_account(id: &str) -> Account {
        let mut account = account(id, "0.00");
        account.status = FeeFineStatus::Closed;
        account
    }

    fn resolved(accounts: Vec<Account>) -> Vec<(AccountId, Option<Account>)> {
        accounts
            .into_iter()
            .map(|account| (account.id.clone(), Some(account)))
            .collect()
    }

    fn entry(account_id: &str, label: &str, amount: &str) -> LedgerEntry {
        LedgerEntry {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            user_id: "user-1".to_string(),
            amount: money(amount),
            balance: money("0.00"),
            type_action: label.to_string(),
            comments: None,
            payment_method: None,
            notify: false,
            date_action: Utc::now(),
            created_at: None,
            source: None,
            transaction_information: None,
        }
    }

    async fn ledger_with(entries: Vec<LedgerEntry>) -> Arc<MemoryLedgerStore> {
        let store = Arc::new(MemoryLedgerStore::new());
        for entry in entries {
            store.append(&entry).await.unwrap();
        }
        store
    }

    #[rstest]
    #[case::letters("abc")]
    #[case::empty("")]
    #[case::two_dots("1.2.3")]
    #[tokio::test]
    async fn test_unparseable_amount_fails_first(#[case] requested: &str) {
        let result = DefaultActionValidation
            .validate(&resolved(vec![account("a", "4.55")]), requested)
            .await;

        assert_eq!(result, Err(FeeFineError::invalid_amount(requested)));
    }

    #[rstest]
    #[case::zero("0.0")]
    #[case::negative("-5.0")]
    #[tokio::test]
    async fn test_non_positive_amount_fails(#[case] requested: &str) {
        let result = DefaultActionValidation
            .validate(&resolved(vec![account("a", "4.55")]), requested)
            .await;

        assert_eq!(result, Err(FeeFineError::amount_not_positive(requested)));
    }

    #[tokio::test]
    async fn test_absent_account_fails_as_not_found() {
        let targets = vec![
            ("a".to_string(), Some(account("a", "4.55"))),
            ("missing".to_string(), None),
        ];

        let result = DefaultActionValidation.validate(&targets, "1.00").await;

        assert_eq!(
            result,
            Err(FeeFineError::accounts_not_found(vec!["missing".to_string()]))
        );
    }

    #[tokio::test]
    async fn test_empty_target_set_fails_as_not_found() {
        let result = DefaultActionValidation.validate(&[], "1.00").await;

        assert_eq!(result, Err(FeeFineError::accounts_not_found(vec![])));
    }

    #[tokio::test]
    async fn test_closed_account_rejected_for_default_actions() {
        let targets = resolved(vec![account("a", "4.55"), closed_account("b")]);

        let result = DefaultActionValidation.validate(&targets, "1.00").await;

        assert_eq!(result, Err(FeeFineError::account_closed("b")));
    }

    #[tokio::test]
    async fn test_amount_above_total_remaining_rejected() {
        let targets = resolved(vec![account("a", "4.55")]);

        let result = DefaultActionValidation.validate(&targets, "4.56").await;

        assert_eq!(result, Err(FeeFineError::exceeds_remaining("4.56")));
    }

    #[tokio::test]
    async fn test_amount_equal_to_total_remaining_accepted() {
        let targets = resolved(vec![account("a", "2.00"), account("b", "3.00")]);

        let amount = DefaultActionValidation
            .validate(&targets, "5.00")
            .await
            .unwrap();

        assert_eq!(amount, money("5.00"));
    }

    #[tokio::test]
    async fn test_long_decimals_rounded_before_comparison() {
        // remaining 1.235987654321 is treated as 1.24
        let targets = resolved(vec![account("a", "1.235987654321")]);

        let amount = DefaultActionValidation
            .validate(&targets, "1.004987654321")
            .await
            .unwrap();

        assert_eq!(amount, money("1.00"));
    }

    #[tokio::test]
    async fn test_failure_echoes_original_unrounded_amount() {
        let targets = resolved(vec![account("a", "0.99")]);

        // Rounds to 1.00 for comparison, still exceeds 0.99
        let result = DefaultActionValidation
            .validate(&targets, "1.004123456789")
            .await;

        let error = result.unwrap_err();
        assert_eq!(error, FeeFineError::exceeds_remaining("1.004123456789"));
        assert_eq!(error.requested_amount(), Some("1.004123456789"));
    }

    #[tokio::test]
    async fn test_check_reports_remaining_after_action() {
        let targets = resolved(vec![account("a", "4.55")]);

        let outcome = DefaultActionValidation
            .check(&targets, "1.23")
            .await
            .unwrap();

        assert_eq!(outcome.amount, "1.23");
        assert_eq!(outcome.remaining, money("3.32"));
    }

    #[tokio::test]
    async fn test_check_rounds_long_decimals_and_echoes_original() {
        let targets = resolved(vec![account("a", "1.235987654321")]);

        let outcome = DefaultActionValidation
            .check(&targets, "1.004987654321")
            .await
            .unwrap();

        // Compared as 1.00 against 1.24; the echoed text stays unrounded
        assert_eq!(outcome.amount, "1.004987654321");
        assert_eq!(outcome.remaining, money("0.24"));
    }

    #[tokio::test]
    async fn test_refund_ignores_closed_status() {
        let ledger = ledger_with(vec![entry("b", "Paid partially", "2.00")]).await;
        let validation = RefundActionValidation::new(ledger);
        let targets = resolved(vec![closed_account("b")]);

        let amount = validation.validate(&targets, "2.00").await.unwrap();

        assert_eq!(amount, money("2.00"));
    }

    #[tokio::test]
    async fn test_refund_maximum_is_pay_and_transfer_history() {
        let ledger = ledger_with(vec![
            entry("a", "Paid partially", "2.00"),
            entry("a", "Transferred partially", "1.50"),
            entry("a", "Waived partially", "9.99"),
            entry("a", "Overdue fine", "9.99"),
        ])
        .await;
        let validation = RefundActionValidation::new(ledger);
        // Live balance is irrelevant to the refund cap
        let targets = resolved(vec![account("a", "0.10")]);

        let amount = validation.validate(&targets, "3.50").await.unwrap();
        assert_eq!(amount, money("3.50"));

        let result = validation.validate(&targets, "3.51").await;
        assert_eq!(result, Err(FeeFineError::exceeds_refundable("3.51")));
    }

    #[tokio::test]
    async fn test_refund_maximum_sums_across_accounts() {
        let ledger = ledger_with(vec![
            entry("a", "Paid fully", "2.00"),
            entry("b", "Paid partially", "3.00"),
        ])
        .await;
        let validation = RefundActionValidation::new(ledger);
        let targets = resolved(vec![account("a", "0.00"), account("b", "1.00")]);

        let outcome = validation.check(&targets, "1.23").await.unwrap();

        // 5.00 refundable across both accounts, minus the requested 1.23
        assert_eq!(outcome.remaining, money("3.77"));
    }

    #[tokio::test]
    async fn test_refund_with_no_history_rejects_any_amount() {
        let ledger = ledger_with(vec![]).await;
        let validation = RefundActionValidation::new(ledger);
        let targets = resolved(vec![account("a", "4.55")]);

        let result = validation.validate(&targets, "0.01").await;

        assert_eq!(result, Err(FeeFineError::exceeds_refundable("0.01")));
    }
}
