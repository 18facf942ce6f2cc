//! Amount distribution across multiple accounts
//!
//! This module implements the pure allocation algorithm used by bulk
//! actions: splitting one requested total across an ordered set of accounts
//! so that the allocations sum to the requested total exactly, while no
//! account receives more than its actionable cap.
//!
//! # Algorithm
//!
//! `SplitEvenlyRecursively` distributes in rounds. Each round divides the
//! still-undistributed amount evenly (rounded to two decimals, half-up)
//! among the accounts that still have headroom under their cap. An account
//! whose headroom is smaller than the even share is fully consumed, and the
//! unconsumed remainder is pushed back for redistribution in the next round
//! over the strictly smaller candidate set. Sub-penny residue left once the
//! even share rounds to zero is assigned to the first account(s) in input
//! order that still have headroom, so the running sum matches the requested
//! total exactly. The tie-break is deliberately order-dependent.
//!
//! If the caps sum to less than the requested total, every account simply
//! receives its full cap; rejecting such requests is the validator's job.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::types::{Account, AccountId, MonetaryValue};

/// Strategy for splitting a requested total across accounts
pub trait AmountSplitter: Send + Sync {
    /// Allocate `total` across `accounts`, capped per account by
    /// `actionable`; accounts missing from `actionable` get a zero cap
    fn split(
        &self,
        total: MonetaryValue,
        accounts: &[Account],
        actionable: &HashMap<AccountId, MonetaryValue>,
    ) -> HashMap<AccountId, MonetaryValue>;
}

/// Even split with per-account caps and recursive remainder redistribution
#[derive(Debug, Default, Clone, Copy)]
pub struct SplitEvenlyRecursively;

impl SplitEvenlyRecursively {
    fn cap_of(
        actionable: &HashMap<AccountId, MonetaryValue>,
        account: &Account,
    ) -> MonetaryValue {
        actionable
            .get(&account.id)
            .copied()
            .unwrap_or_else(MonetaryValue::zero)
    }
}

impl AmountSplitter for SplitEvenlyRecursively {
    fn split(
        &self,
        total: MonetaryValue,
        accounts: &[Account],
        actionable: &HashMap<AccountId, MonetaryValue>,
    ) -> HashMap<AccountId, MonetaryValue> {
        let mut allocations: HashMap<AccountId, MonetaryValue> = accounts
            .iter()
            .map(|account| (account.id.clone(), MonetaryValue::zero()))
            .collect();
        let mut undistributed = total;

        // Redistribution rounds over the shrinking set of uncapped accounts
        while undistributed.is_positive() {
            let candidates = accounts
                .iter()
                .filter(|account| {
                    Self::cap_of(actionable, account)
                        .subtract(allocations[&account.id])
                        .is_positive()
                })
                .count();
            if candidates == 0 {
                break;
            }

            let share = MonetaryValue::new(
                undistributed.inner() / Decimal::from(candidates as u64),
            );
            if share.is_zero() {
                // Sub-penny residue, handled below in input order
                break;
            }

            for account in accounts {
                let headroom =
                    Self::cap_of(actionable, account).subtract(allocations[&account.id]);
                if !headroom.is_positive() {
                    continue;
                }
                // Never overshoot: half-up shares can sum past the remainder
                let take = share.min(headroom).min(undistributed);
                allocations
                    .insert(account.id.clone(), allocations[&account.id].add(take));
                undistributed = undistributed.subtract(take);
                if undistributed.is_zero() {
                    break;
                }
            }
        }

        // Residual pennies go to the first accounts in input order, one
        // penny each, until the running sum matches the requested total
        let penny = MonetaryValue::new(Decimal::new(1, 2));
        while undistributed.is_positive() {
            let mut progressed = false;
            for account in accounts {
                let headroom =
                    Self::cap_of(actionable, account).subtract(allocations[&account.id]);
                if !headroom.is_positive() {
                    continue;
                }
                let take = penny.min(headroom).min(undistributed);
                allocations
                    .insert(account.id.clone(), allocations[&account.id].add(take));
                undistributed = undistributed.subtract(take);
                progressed = true;
                if undistributed.is_zero() {
                    break;
                }
            }
            // Caps exhausted; the rest stays undistributed (validated upstream)
            if !progressed {
                break;
            }
        }

        allocations
    }
}
