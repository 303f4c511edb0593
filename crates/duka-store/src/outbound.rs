//! # Outbound Writes
//!
//! The store never calls the network. Every mutation the remote store
//! should eventually see is queued as an [`OutboundWrite`]; the
//! replication worker in `duka-remote` drains the queue and issues the
//! corresponding REST call, best-effort.
//!
//! ## Delivery Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  local mutation ──► queue OutboundWrite ──► replicator ──► REST call   │
//! │                                                                         │
//! │  • each write is attempted ONCE; a failure is logged and dropped       │
//! │  • local state is never rolled back on remote failure                  │
//! │  • the sale ledger's synced flag is the only durability signal,        │
//! │    and it is reconciled by the connectivity handler, not by acks       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use duka_core::{Product, Sale};

use crate::catalog::ProductPatch;

/// A pending write destined for the remote store API.
#[derive(Debug, Clone)]
pub enum OutboundWrite {
    /// POST a new catalog product.
    CreateProduct(Product),
    /// PUT a partial product update (stock reconciliation, edits).
    UpdateProduct { id: i64, patch: ProductPatch },
    /// DELETE a catalog product.
    DeleteProduct(i64),
    /// POST a finalized sale record.
    CreateSale(Sale),
}

impl OutboundWrite {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundWrite::CreateProduct(_) => "create_product",
            OutboundWrite::UpdateProduct { .. } => "update_product",
            OutboundWrite::DeleteProduct(_) => "delete_product",
            OutboundWrite::CreateSale(_) => "create_sale",
        }
    }
}
