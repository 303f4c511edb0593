//! # Store Snapshot
//!
//! The serializable subset of [`PosStore`](crate::PosStore) state.
//! Everything here survives a restart; everything else (session,
//! online flag, outbound queue) is deliberately rebuilt fresh.

use duka_core::{CartItem, CartTab, Notification, Product, Sale, Shift, Supplier};
use serde::{Deserialize, Serialize};

/// Durable store state, written to disk as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub notifications: Vec<Notification>,
    pub suppliers: Vec<Supplier>,
    pub pending_syncs: u32,
    pub shifts: Vec<Shift>,
    pub current_shift: Option<Shift>,
    pub cart_tabs: Vec<CartTab>,
    pub active_tab_id: String,
    /// Working items of the active tab (its parked entry may be stale).
    pub cart: Vec<CartItem>,
}
