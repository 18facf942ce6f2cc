//! Store adapters module
//!
//! In-memory implementations of the collaborator traits plus the
//! tenant-keyed registry used to select a tenant's store pair:
//! - `memory` - DashMap-backed account and ledger stores
//! - `notice` - logging stand-in for the patron-notice collaborator

pub mod memory;
pub mod notice;

use std::sync::Arc;

use dashmap::DashMap;

pub use memory::{MemoryAccountStore, MemoryLedgerStore};
pub use notice::LoggingNoticeDispatcher;

/// Opaque tenant key used to select a tenant's isolated stores
pub type TenantId = String;

/// Tenant-keyed registry of store pairs
///
/// Resolves the store pair for a tenant, creating it on first use. The
/// pipeline itself is tenant-agnostic: orchestrators are constructed with
/// an already-selected pair.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    tenants: DashMap<TenantId, (Arc<MemoryAccountStore>, Arc<MemoryLedgerStore>)>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self {
            tenants: DashMap::new(),
        }
    }

    /// The store pair for `tenant`, created on first use
    pub fn for_tenant(
        &self,
        tenant: &str,
    ) -> (Arc<MemoryAccountStore>, Arc<MemoryLedgerStore>) {
        self.tenants
            .entry(tenant.to_string())
            .or_insert_with(|| {
                (
                    Arc::new(MemoryAccountStore::new()),
                    Arc::new(MemoryLedgerStore::new()),
                )
            })
            .clone()
    }
}
