//! # duka-core: Pure Domain Model for Duka POS
//!
//! This crate is the foundation of Duka POS. It contains the domain types
//! and arithmetic shared by the state machine and the remote client, with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Duka POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI Surfaces (out of scope)                   │   │
//! │  │    Catalog grid ──► Cart panel ──► Tender ──► Receipt           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                duka-store (PosStore state machine)              │   │
//! │  │    cart tabs • sale finalize • stock adjust • shifts • sync     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ duka-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │ quantity  │  │   types   │  │ validation│  │   │
//! │  │   │   Money   │  │ Quantity  │  │  Product  │  │   rules   │  │   │
//! │  │   │ line math │  │ 1/1000ths │  │   Sale    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer arithmetic**: money is i64 minor units, quantities are i64
//!    thousandths. No floating point anywhere near a total.
//! 2. **Snapshot pattern**: a [`types::Sale`] freezes its cart lines at
//!    finalize time; later catalog edits never change a receipt.
//! 3. **Explicit errors**: validation failures are typed, never strings.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod quantity;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quantity::Quantity;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default business (tenant) id used when no cashier identity has resolved
/// one yet. The remote store scopes every catalog request by business id.
pub const DEFAULT_BUSINESS_ID: i64 = 1;

/// Maximum quantity of a single cart line, in thousandths (999 whole units).
///
/// ## Business Reason
/// Prevents accidental over-ordering (typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY_MILLI: i64 = 999_000;

/// How many notifications the feed retains (most recent first).
pub const NOTIFICATION_RETENTION: usize = 50;
