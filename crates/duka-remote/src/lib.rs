//! # duka-remote: Remote Store Client & Replication
//!
//! The only crate in the workspace that touches the network.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             duka-remote                                 │
//! │                                                                         │
//! │   PosStore (duka-store)                                                 │
//! │        │ drain_outbound()                                               │
//! │        ▼                                                                │
//! │   Replicator ───► RemoteApi ───► https://.../api/{products,sales}      │
//! │   (interval loop)  (reqwest)                                            │
//! │                                                                         │
//! │   RemoteApi::login(pin) ───────► /api/users/login                       │
//! │   refresh_catalog() ───────────► GET /api/products ──► replace_all     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//! Best-effort, local-first. A failed write is logged and dropped; the
//! store is the system of record for the running session and is never
//! rolled back because the network disagreed.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod error;
pub mod replicator;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use client::RemoteApi;
pub use error::{RemoteError, RemoteResult};
pub use replicator::{refresh_catalog, Replicator, ReplicatorHandle, DEFAULT_DRAIN_INTERVAL};
