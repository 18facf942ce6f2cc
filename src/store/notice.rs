//! Logging notice dispatcher
//!
//! Stands in for the external patron-notice collaborator: template selection
//! and delivery live outside this engine, so the CLI and tests only need a
//! dispatcher that records what would have been sent.

use async_trait::async_trait;
use tracing::info;

use crate::core::traits::NoticeDispatcher;
use crate::types::{FeeFineError, LedgerEntry};

/// Dispatcher that logs each notice instead of delivering it
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNoticeDispatcher;

#[async_trait]
impl NoticeDispatcher for LoggingNoticeDispatcher {
    async fn send_for_entry(&self, entry: &LedgerEntry) -> Result<(), FeeFineError> {
        info!(
            entry_id = %entry.id,
            account_id = %entry.account_id,
            user_id = %entry.user_id,
            type_action = %entry.type_action,
            amount = %entry.amount,
            "patron notice dispatched"
        );
        Ok(())
    }
}
