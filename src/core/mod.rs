//! Core business logic module
//!
//! This module contains the bulk action processing components:
//! - `traits` - collaborator seams (account store, ledger store, notices)
//! - `splitter` - amount distribution across accounts
//! - `validation` - action-specific validation chains
//! - `context` - per-invocation pipeline state
//! - `orchestrator` - the five-stage bulk action pipeline

pub mod context;
pub mod orchestrator;
pub mod splitter;
pub mod traits;
pub mod validation;

pub use context::ActionContext;
pub use orchestrator::BulkActionOrchestrator;
pub use splitter::{AmountSplitter, SplitEvenlyRecursively};
pub use traits::{AccountStore, LedgerStore, NoticeDispatcher};
pub use validation::{ActionValidation, DefaultActionValidation, RefundActionValidation};
