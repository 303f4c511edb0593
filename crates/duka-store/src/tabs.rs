//! # Cart Tab Manager
//!
//! A cashier often serves several customers interleaved: one shopper runs
//! back for an item while the next is rung up. Each customer gets a cart
//! "tab"; exactly one is active at a time.
//!
//! ## Snapshot Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tab Switching                                     │
//! │                                                                         │
//! │   active items: [Bread x1, Milk x2]        tab-1 ◄── snapshot outgoing │
//! │          │                                                              │
//! │   switch_tab("tab-2")                                                   │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   active items: [Sugar x1]                 tab-2 ──► loaded incoming   │
//! │                                                                         │
//! │   INVARIANTS:                                                           │
//! │   • the outgoing tab's items are saved before the incoming tab loads   │
//! │   • switching to the already-active tab does nothing at all            │
//! │   • operations on the active cart never touch a parked tab             │
//! │   • at least one tab always exists                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown tab ids and attempts to remove the last tab are silent no-ops,
//! never errors: the visible state simply does not change.

use duka_core::{CartItem, CartTab, Money, Product, Quantity};
use tracing::debug;

use crate::ids;

/// Owns the set of cart tabs and the active working cart.
///
/// The active tab's items live in `active_items` (the list the UI renders
/// and the sale finalizer consumes); the entry in `tabs` for the active id
/// holds the items as of the last switch. Parked tabs are always current.
#[derive(Debug, Clone)]
pub struct TabManager {
    tabs: Vec<CartTab>,
    active_id: String,
    active_items: Vec<CartItem>,
}

impl TabManager {
    /// Creates a manager with a single empty tab, which is active.
    pub fn new() -> Self {
        TabManager {
            tabs: vec![CartTab {
                id: "tab-1".to_string(),
                label: "Customer 1".to_string(),
                items: Vec::new(),
            }],
            active_id: "tab-1".to_string(),
            active_items: Vec::new(),
        }
    }

    /// Rebuilds the manager from persisted state.
    ///
    /// Falls back to a fresh single tab if the persisted active id is not
    /// among the persisted tabs (a snapshot from a crashed session).
    pub fn restore(tabs: Vec<CartTab>, active_id: String, active_items: Vec<CartItem>) -> Self {
        if tabs.iter().any(|t| t.id == active_id) {
            TabManager {
                tabs,
                active_id,
                active_items,
            }
        } else {
            debug!(%active_id, "Persisted active tab missing, starting fresh");
            TabManager::new()
        }
    }

    // =========================================================================
    // Tab Operations
    // =========================================================================

    /// Parks the active cart and opens a new empty tab, which becomes
    /// active. Returns the new tab's id.
    pub fn add_tab(&mut self) -> String {
        self.snapshot_active();

        let id = ids::time_derived("tab");
        let label = format!("Customer {}", self.tabs.len() + 1);
        self.tabs.push(CartTab {
            id: id.clone(),
            label,
            items: Vec::new(),
        });

        self.active_id = id.clone();
        self.active_items.clear();

        debug!(tab_id = %id, tabs = self.tabs.len(), "Opened cart tab");
        id
    }

    /// Switches the active tab.
    ///
    /// Switching to the already-active tab is a strict no-op (no snapshot,
    /// no reload). An unknown id is also a no-op.
    pub fn switch_tab(&mut self, target_id: &str) {
        if target_id == self.active_id {
            return;
        }

        if !self.tabs.iter().any(|t| t.id == target_id) {
            debug!(%target_id, "switch_tab target not found, ignoring");
            return;
        }

        self.snapshot_active();

        // Lookup is infallible after the existence check above.
        if let Some(target) = self.tabs.iter().find(|t| t.id == target_id) {
            self.active_items = target.items.clone();
            self.active_id = target_id.to_string();
        }
    }

    /// Removes a tab. No-op if it is the last remaining tab or the id is
    /// unknown. If the removed tab was active, the first remaining tab
    /// becomes active and its items load.
    pub fn remove_tab(&mut self, id: &str) {
        if self.tabs.len() <= 1 {
            debug!("remove_tab refused: a session always keeps one tab");
            return;
        }

        let before = self.tabs.len();
        self.tabs.retain(|t| t.id != id);
        if self.tabs.len() == before {
            return;
        }

        if id == self.active_id {
            let first = &self.tabs[0];
            self.active_id = first.id.clone();
            self.active_items = first.items.clone();
        }
    }

    /// Saves the active cart into its tab entry.
    fn snapshot_active(&mut self) {
        let active_id = &self.active_id;
        if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == *active_id) {
            tab.items = self.active_items.clone();
        }
    }

    // =========================================================================
    // Active Cart Operations
    // =========================================================================

    /// Adds a product to the active cart, merging quantities if the
    /// product is already present. Non-positive quantities are ignored.
    pub fn add_item(&mut self, product: Product, quantity: Quantity) {
        if !quantity.is_positive() {
            debug!(product_id = product.id, %quantity, "add_item ignored non-positive quantity");
            return;
        }

        if let Some(item) = self
            .active_items
            .iter_mut()
            .find(|i| i.product.id == product.id)
        {
            item.quantity += quantity;
        } else {
            self.active_items.push(CartItem::new(product, quantity));
        }
    }

    /// Sets the quantity of a line in the active cart.
    ///
    /// A quantity of zero or less removes the line. An unknown product id
    /// is a no-op.
    pub fn update_item_quantity(&mut self, product_id: i64, quantity: Quantity) {
        if !quantity.is_positive() {
            self.remove_item(product_id);
            return;
        }

        if let Some(item) = self
            .active_items
            .iter_mut()
            .find(|i| i.product.id == product_id)
        {
            item.quantity = quantity;
        }
    }

    /// Removes a line from the active cart.
    pub fn remove_item(&mut self, product_id: i64) {
        self.active_items.retain(|i| i.product.id != product_id);
    }

    /// Clears all lines from the active cart.
    pub fn clear_active(&mut self) {
        self.active_items.clear();
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// The active cart's lines.
    pub fn active_items(&self) -> &[CartItem] {
        &self.active_items
    }

    /// The active tab's id.
    pub fn active_tab_id(&self) -> &str {
        &self.active_id
    }

    /// All tabs, with the active tab's stored items refreshed to match the
    /// working cart. Used for rendering the tab strip and for snapshots.
    pub fn tabs(&self) -> Vec<CartTab> {
        self.tabs
            .iter()
            .map(|t| {
                if t.id == self.active_id {
                    CartTab {
                        id: t.id.clone(),
                        label: t.label.clone(),
                        items: self.active_items.clone(),
                    }
                } else {
                    t.clone()
                }
            })
            .collect()
    }

    /// Raw parked tabs, exactly as stored. The active tab's entry may lag
    /// the working cart; snapshots pair this with [`Self::active_items`].
    pub fn tabs_raw(&self) -> &[CartTab] {
        &self.tabs
    }

    /// Sum of line totals for the active cart.
    pub fn active_total(&self) -> Money {
        self.active_items.iter().map(|i| i.line_total()).sum()
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use duka_core::Unit;

    fn product(id: i64, price_shillings: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            category: "Beverages".to_string(),
            price: Money::from_shillings(price_shillings),
            unit: Unit::Piece,
            stock: Quantity::from_whole(50),
            barcode: format!("1000{:02}", id),
            low_stock_threshold: Quantity::from_whole(10),
        }
    }

    #[test]
    fn test_starts_with_one_active_tab() {
        let tabs = TabManager::new();
        assert_eq!(tabs.tab_count(), 1);
        assert_eq!(tabs.active_tab_id(), "tab-1");
        assert!(tabs.active_items().is_empty());
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(2));
        tabs.add_item(product(1, 70), Quantity::from_whole(3));

        assert_eq!(tabs.active_items().len(), 1);
        assert_eq!(tabs.active_items()[0].quantity, Quantity::from_whole(5));
    }

    #[test]
    fn test_tab_isolation() {
        let mut tabs = TabManager::new();
        let first_id = tabs.active_tab_id().to_string();

        tabs.add_item(product(1, 70), Quantity::from_whole(2));
        tabs.add_item(product(2, 150), Quantity::from_whole(1));

        let second_id = tabs.add_tab();
        assert!(tabs.active_items().is_empty());
        tabs.add_item(product(3, 45), Quantity::from_whole(4));

        // Back to the first customer: items untouched.
        tabs.switch_tab(&first_id);
        assert_eq!(tabs.active_items().len(), 2);
        assert_eq!(tabs.active_items()[0].product.id, 1);

        // And the second tab kept its own line.
        tabs.switch_tab(&second_id);
        assert_eq!(tabs.active_items().len(), 1);
        assert_eq!(tabs.active_items()[0].product.id, 3);
    }

    #[test]
    fn test_switch_to_active_tab_is_noop() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(2));

        let active = tabs.active_tab_id().to_string();
        tabs.switch_tab(&active);

        assert_eq!(tabs.active_items().len(), 1);
        assert_eq!(tabs.active_tab_id(), active);
        // No snapshot occurred: the stored tab entry still lags.
        assert!(tabs.tabs_raw()[0].items.is_empty());
    }

    #[test]
    fn test_switch_to_unknown_tab_is_noop() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(2));

        tabs.switch_tab("tab-nope");

        assert_eq!(tabs.active_tab_id(), "tab-1");
        assert_eq!(tabs.active_items().len(), 1);
    }

    #[test]
    fn test_cannot_remove_last_tab() {
        let mut tabs = TabManager::new();
        let only = tabs.active_tab_id().to_string();
        tabs.remove_tab(&only);
        assert_eq!(tabs.tab_count(), 1);
    }

    #[test]
    fn test_remove_active_tab_activates_first_remaining() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(1));

        let second = tabs.add_tab();
        tabs.add_item(product(2, 150), Quantity::from_whole(2));

        tabs.remove_tab(&second);

        assert_eq!(tabs.tab_count(), 1);
        assert_eq!(tabs.active_tab_id(), "tab-1");
        assert_eq!(tabs.active_items().len(), 1);
        assert_eq!(tabs.active_items()[0].product.id, 1);
    }

    #[test]
    fn test_remove_parked_tab_keeps_active_cart() {
        let mut tabs = TabManager::new();
        let first = tabs.active_tab_id().to_string();
        let second = tabs.add_tab();
        tabs.add_item(product(2, 150), Quantity::from_whole(2));

        tabs.remove_tab(&first);

        assert_eq!(tabs.active_tab_id(), second);
        assert_eq!(tabs.active_items().len(), 1);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(2));

        tabs.update_item_quantity(1, Quantity::ZERO);
        assert!(tabs.active_items().is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(2));

        tabs.update_item_quantity(1, Quantity::from_whole(7));
        assert_eq!(tabs.active_items()[0].quantity, Quantity::from_whole(7));
    }

    #[test]
    fn test_active_total() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(2));
        tabs.add_item(product(2, 150), Quantity::from_whole(1));

        assert_eq!(tabs.active_total(), Money::from_shillings(290));
    }

    #[test]
    fn test_tabs_view_refreshes_active_entry() {
        let mut tabs = TabManager::new();
        tabs.add_item(product(1, 70), Quantity::from_whole(2));

        let view = tabs.tabs();
        assert_eq!(view[0].items.len(), 1);
        // The raw parked entry only updates on switch/add_tab.
        assert!(tabs.tabs_raw()[0].items.is_empty());
    }

    #[test]
    fn test_restore_with_missing_active_id_starts_fresh() {
        let tabs = TabManager::restore(Vec::new(), "tab-ghost".to_string(), Vec::new());
        assert_eq!(tabs.tab_count(), 1);
        assert_eq!(tabs.active_tab_id(), "tab-1");
    }
}
