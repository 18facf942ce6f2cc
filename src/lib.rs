//! Fee/Fine Bulk Action Engine Library
//! # Overview
//!
//! This library processes bulk monetary actions (pay, waive, transfer,
//! refund, cancel) against library patron fee/fine accounts: one requested
//! total is validated, distributed across the target accounts to the penny,
//! recorded as immutable ledger entries, and applied to the mutable account
//! balances.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (MonetaryValue, Account, LedgerEntry, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::orchestrator`] - The five-stage bulk action pipeline
//!   - [`core::validation`] - Action-specific validation chains
//!   - [`core::splitter`] - Amount distribution across accounts
//!   - [`core::traits`] - Collaborator seams (stores, notices)
//! - [`store`] - In-memory store adapters and the tenant registry
//! - [`io`] - CSV handling for the CLI surface
//!
//! # Pipeline
//!
//! Every bulk action runs the same five stages, each gated on the previous
//! one completing for all accounts in the request:
//!
//! 1. **Locate** - resolve target accounts, keeping absent markers
//! 2. **Validate** - action-specific rules, short-circuiting in order
//! 3. **Allocate & record** - distribute the amount, append ledger entries
//! 4. **Persist** - write mutated accounts back
//! 5. **Notify** - dispatch patron notices (failures never fail the action)
//!
//! # Validation variants
//!
//! Pay, waive, transfer and cancel share the default rules: closed accounts
//! are rejected and the cap is the targets' total remaining balance.
//! Refunds ignore account status and are capped by the historical
//! refundable amount (prior Pay and Transfer entries).

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod store;
pub mod types;

pub use crate::core::{
    AccountStore, ActionValidation, BulkActionOrchestrator, LedgerStore, NoticeDispatcher,
    SplitEvenlyRecursively,
};
pub use types::{
    Account, AccountId, ActionType, BulkActionOutcome, BulkActionRequest, CheckOutcome,
    FeeFineError, FeeFineStatus, LedgerEntry, MonetaryValue,
};
