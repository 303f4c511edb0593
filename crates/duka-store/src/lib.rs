//! # duka-store: The POS Session State Machine
//!
//! One terminal, one [`PosStore`]. It owns every piece of client-held state
//! the POS needs between remote round trips and is the single place the
//! cart/sale/shift invariants are enforced.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           PosStore                                      │
//! │                                                                         │
//! │  UI events ──► ┌───────────────┐      ┌──────────────────┐             │
//! │                │  TabManager   │─────►│  Sale finalize   │             │
//! │                │ (cart tabs)   │      │ (complete_sale)  │             │
//! │                └───────────────┘      └────────┬─────────┘             │
//! │                                                 │                       │
//! │   gates ◄── ShiftTracker                        ▼                       │
//! │                               ┌────────────────────────────┐           │
//! │                               │ Catalog (stock decrement,  │           │
//! │                               │ clamp at zero, low-stock)  │           │
//! │                               └────────────┬───────────────┘           │
//! │                                            │                            │
//! │                  SalesLedger ◄─────────────┤                            │
//! │                  (history + pending syncs) │                            │
//! │                                            ▼                            │
//! │                NotificationLog      outbound queue ──► duka-remote     │
//! │                (bounded feed)       (OutboundWrite)    (best-effort)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! The store is synchronous and single-writer: every operation runs to
//! completion before the next, so the struct needs no internal locking.
//! Callers that share it across tasks wrap it in `Arc<Mutex<PosStore>>`
//! and keep the critical sections short; all operations are in-memory.
//!
//! ## Error Philosophy
//! Expected rejections (no open shift, empty cart, unknown tab) are normal
//! control-flow results: `None`, `false`, or a silent no-op, exactly what
//! the caller must check. Only persistence raises a typed [`StoreError`].

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
mod ids;
pub mod ledger;
pub mod notifications;
pub mod outbound;
pub mod persist;
pub mod shift;
pub mod snapshot;
pub mod store;
pub mod tabs;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, ProductPatch, StockAdjustment};
pub use ledger::SalesLedger;
pub use notifications::NotificationLog;
pub use outbound::OutboundWrite;
pub use persist::{StoreError, StoreResult};
pub use shift::ShiftTracker;
pub use snapshot::StoreSnapshot;
pub use store::PosStore;
pub use tabs::TabManager;
