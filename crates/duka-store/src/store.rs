//! # POS Store
//!
//! The single state machine behind a register terminal. Owns the
//! catalog, cart tabs, shift tracker, sales ledger, notification feed,
//! suppliers and the cashier session, and wires them together so every
//! operation lands with all of its side effects or none of them.
//!
//! ## Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │                              PosStore                                 │
//! │                                                                       │
//! │  ┌──────────┐  ┌────────────┐  ┌──────────────┐  ┌────────────────┐  │
//! │  │ Catalog  │  │ TabManager │  │ ShiftTracker │  │  SalesLedger   │  │
//! │  └──────────┘  └────────────┘  └──────────────┘  └────────────────┘  │
//! │  ┌─────────────────┐  ┌───────────┐  ┌─────────────────────────────┐ │
//! │  │ NotificationLog │  │ Suppliers │  │ outbound: VecDeque<Write>   │ │
//! │  └─────────────────┘  └───────────┘  └─────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────────────┘
//!          ▲ UI commands                         │ drain_outbound()
//!          │                                     ▼
//!       frontend                        duka-remote Replicator
//! ```
//!
//! ## Concurrency
//! `PosStore` is single-threaded by construction. Callers that share it
//! across tasks wrap it in `Arc<Mutex<PosStore>>`; no locking happens
//! here.

use std::collections::VecDeque;

use chrono::Utc;
use duka_core::{
    validation, CartItem, CartTab, Cashier, CoreError, CoreResult, Money, Notification,
    NotificationKind, PaymentMethod, Product, Quantity, Sale, Shift, Supplier,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, ProductPatch, StockAdjustment};
use crate::ids;
use crate::ledger::SalesLedger;
use crate::notifications::NotificationLog;
use crate::outbound::OutboundWrite;
use crate::shift::ShiftTracker;
use crate::snapshot::StoreSnapshot;
use crate::tabs::TabManager;

/// Register-terminal state machine.
#[derive(Debug)]
pub struct PosStore {
    catalog: Catalog,
    tabs: TabManager,
    shifts: ShiftTracker,
    ledger: SalesLedger,
    notifications: NotificationLog,
    suppliers: Vec<Supplier>,
    session: Option<Cashier>,
    online: bool,
    outbound: VecDeque<OutboundWrite>,
}

impl Default for PosStore {
    fn default() -> Self {
        PosStore::new()
    }
}

impl PosStore {
    /// Fresh store: empty catalog, one cart tab, assumed online.
    pub fn new() -> Self {
        PosStore {
            catalog: Catalog::new(),
            tabs: TabManager::new(),
            shifts: ShiftTracker::new(),
            ledger: SalesLedger::new(),
            notifications: NotificationLog::new(),
            suppliers: Vec::new(),
            session: None,
            online: true,
            outbound: VecDeque::new(),
        }
    }

    /// Rebuilds a store from a persisted snapshot. Session, connectivity
    /// and the outbound queue always start fresh.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        PosStore {
            catalog: Catalog::with_products(snapshot.products),
            tabs: TabManager::restore(snapshot.cart_tabs, snapshot.active_tab_id, snapshot.cart),
            shifts: ShiftTracker::restore(snapshot.current_shift, snapshot.shifts),
            ledger: SalesLedger::restore(snapshot.sales, snapshot.pending_syncs),
            notifications: NotificationLog::restore(snapshot.notifications),
            suppliers: snapshot.suppliers,
            session: None,
            online: true,
            outbound: VecDeque::new(),
        }
    }

    /// Captures the durable subset of state.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            products: self.catalog.products().to_vec(),
            sales: self.ledger.sales().to_vec(),
            notifications: self.notifications.entries().to_vec(),
            suppliers: self.suppliers.clone(),
            pending_syncs: self.ledger.pending_syncs(),
            shifts: self.shifts.history().to_vec(),
            current_shift: self.shifts.current().cloned(),
            cart_tabs: self.tabs.tabs_raw().to_vec(),
            active_tab_id: self.tabs.active_tab_id().to_string(),
            cart: self.tabs.active_items().to_vec(),
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Signs a cashier in, replacing any previous session.
    pub fn set_cashier(&mut self, cashier: Cashier) {
        info!(cashier_id = %cashier.id, name = %cashier.name, "cashier signed in");
        self.session = Some(cashier);
    }

    /// Signs the cashier out and empties the active cart.
    pub fn clear_session(&mut self) {
        if let Some(cashier) = self.session.take() {
            info!(cashier_id = %cashier.id, "cashier signed out");
        }
        self.tabs.clear_active();
    }

    pub fn session(&self) -> Option<&Cashier> {
        self.session.as_ref()
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Opens a shift for the signed-in cashier. Returns `false` when no
    /// cashier is signed in or a shift is already open.
    pub fn start_shift(&mut self) -> bool {
        let Some(cashier) = self.session.clone() else {
            warn!("start_shift rejected: no cashier signed in");
            return false;
        };
        self.shifts.start(&cashier)
    }

    /// Closes the open shift, if any, returning the completed record.
    pub fn end_shift(&mut self) -> Option<Shift> {
        self.shifts.end()
    }

    pub fn shift_open(&self) -> bool {
        self.shifts.is_open()
    }

    pub fn current_shift(&self) -> Option<&Shift> {
        self.shifts.current()
    }

    pub fn shift_history(&self) -> &[Shift] {
        self.shifts.history()
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Adds `quantity` of a catalog product to the active cart. Returns
    /// `false` when the product id is unknown or the quantity is invalid
    /// (non-positive, above the per-line cap, or fractional on a counted
    /// unit).
    pub fn add_to_cart(&mut self, product_id: i64, quantity: Quantity) -> bool {
        let Some(product) = self.catalog.get(product_id).cloned() else {
            warn!(product_id, "add_to_cart rejected: unknown product");
            return false;
        };
        if let Err(e) = validation::validate_line_quantity(quantity)
            .and_then(|_| validation::validate_quantity_for_unit(quantity, product.unit))
        {
            warn!(product_id, %quantity, error = %e, "add_to_cart rejected");
            return false;
        }
        self.tabs.add_item(product, quantity);
        true
    }

    /// Sets the quantity of an active-cart line. A quantity of zero or
    /// less removes the line; a positive quantity must pass the same
    /// checks as [`Self::add_to_cart`] or the call is a no-op.
    pub fn update_cart_quantity(&mut self, product_id: i64, quantity: Quantity) {
        if quantity.is_positive() {
            let unit = self
                .tabs
                .active_items()
                .iter()
                .find(|i| i.product.id == product_id)
                .map(|i| i.product.unit);
            let Some(unit) = unit else {
                return;
            };
            if let Err(e) = validation::validate_line_quantity(quantity)
                .and_then(|_| validation::validate_quantity_for_unit(quantity, unit))
            {
                warn!(product_id, %quantity, error = %e, "update_cart_quantity rejected");
                return;
            }
        }
        self.tabs.update_item_quantity(product_id, quantity);
    }

    pub fn remove_from_cart(&mut self, product_id: i64) {
        self.tabs.remove_item(product_id);
    }

    pub fn clear_cart(&mut self) {
        self.tabs.clear_active();
    }

    /// Parks the working cart and opens a fresh tab. Returns the new id.
    pub fn add_tab(&mut self) -> String {
        self.tabs.add_tab()
    }

    pub fn switch_tab(&mut self, tab_id: &str) {
        self.tabs.switch_tab(tab_id);
    }

    pub fn remove_tab(&mut self, tab_id: &str) {
        self.tabs.remove_tab(tab_id);
    }

    pub fn cart_items(&self) -> &[CartItem] {
        self.tabs.active_items()
    }

    pub fn cart_total(&self) -> Money {
        self.tabs.active_total()
    }

    pub fn cart_tabs(&self) -> Vec<CartTab> {
        self.tabs.tabs()
    }

    pub fn active_tab_id(&self) -> &str {
        self.tabs.active_tab_id()
    }

    // ========================================================================
    // Checkout
    // ========================================================================

    /// Finalizes the active cart as a sale.
    ///
    /// ## Preconditions
    /// A cashier must be signed in, a shift must be open, and the cart
    /// must not be empty. When any precondition fails the call returns
    /// `None` with zero side effects.
    ///
    /// ## Effects
    /// 1. Decrements stock for every line (clamped at zero), queueing a
    ///    stock write and a low stock notification where warranted.
    /// 2. Records the sale, marked unsynced when offline.
    /// 3. Empties the active cart and queues the sale for replication.
    /// 4. Posts a payment notification.
    pub fn complete_sale(
        &mut self,
        method: PaymentMethod,
        payment_ref: Option<String>,
    ) -> Option<Sale> {
        let Some(cashier) = self.session.clone() else {
            warn!("complete_sale rejected: no cashier signed in");
            return None;
        };
        if !self.shifts.is_open() {
            warn!("complete_sale rejected: no open shift");
            return None;
        }
        if self.tabs.active_items().is_empty() {
            debug!("complete_sale ignored: cart is empty");
            return None;
        }

        let items = self.tabs.active_items().to_vec();
        let total = self.tabs.active_total();

        for item in &items {
            if let Some(adjustment) = self.catalog.adjust_stock(item.product.id, -item.quantity) {
                self.apply_stock_adjustment(&adjustment);
            }
        }

        let sale = Sale {
            id: ids::time_derived("sale"),
            items,
            total,
            payment_method: method,
            payment_ref,
            cashier_id: cashier.id,
            cashier_name: cashier.name,
            timestamp: Utc::now(),
            synced: self.online,
        };

        self.ledger.record(sale.clone());
        self.tabs.clear_active();
        self.outbound.push_back(OutboundWrite::CreateSale(sale.clone()));
        self.notifications.push(
            NotificationKind::Payment,
            "Sale Complete",
            format!("{} via {}", total, method),
        );

        info!(
            sale_id = %sale.id,
            total = sale.total.cents(),
            method = %sale.payment_method,
            synced = sale.synced,
            "sale completed"
        );

        Some(sale)
    }

    // ========================================================================
    // Connectivity
    // ========================================================================

    /// Records connectivity. Any online signal with pending sales
    /// reconciles them as synced; going offline changes nothing else.
    ///
    /// This is level-triggered on purpose: pending sales restored from a
    /// snapshot must reconcile on the next online signal even though the
    /// flag never observed an offline state in this process.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
        if online && self.ledger.pending_syncs() > 0 {
            self.sync_pending_sales();
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    fn sync_pending_sales(&mut self) {
        let reconciled = self.ledger.reconcile();
        if reconciled > 0 {
            info!(count = reconciled, "pending sales reconciled");
            self.notifications.push(
                NotificationKind::Sync,
                "Sync Complete",
                format!("{} sales synced successfully", reconciled),
            );
        }
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Replaces the whole catalog, typically after a remote fetch.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        debug!(count = products.len(), "catalog replaced");
        self.catalog.replace_all(products);
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.catalog.get(id)
    }

    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.catalog.find_by_barcode(barcode)
    }

    pub fn search_products(&self, query: &str) -> Vec<&Product> {
        self.catalog.search(query)
    }

    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.catalog.low_stock_products()
    }

    /// Adds stock deltas outside of a sale (deliveries, corrections).
    /// Returns the resulting adjustment, or `None` for an unknown id.
    pub fn adjust_stock(&mut self, product_id: i64, delta: Quantity) -> Option<StockAdjustment> {
        let adjustment = self.catalog.adjust_stock(product_id, delta)?;
        self.apply_stock_adjustment(&adjustment);
        Some(adjustment)
    }

    fn apply_stock_adjustment(&mut self, adjustment: &StockAdjustment) {
        self.outbound.push_back(OutboundWrite::UpdateProduct {
            id: adjustment.product_id,
            patch: ProductPatch::stock(adjustment.new_stock),
        });
        if adjustment.low_stock {
            self.notifications.push(
                NotificationKind::LowStock,
                "Low Stock Alert",
                format!(
                    "{} is running low ({} left)",
                    adjustment.product_name, adjustment.new_stock
                ),
            );
        }
    }

    /// Adds a catalog product after validating its fields.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        validation::validate_product_name(&product.name)?;
        validation::validate_price(product.price)?;
        validation::validate_barcode(&product.barcode)?;

        self.outbound
            .push_back(OutboundWrite::CreateProduct(product.clone()));
        self.catalog.add_product(product);
        Ok(())
    }

    /// Applies a partial edit after validating the fields it carries.
    pub fn update_product(&mut self, product_id: i64, patch: ProductPatch) -> CoreResult<()> {
        if let Some(name) = &patch.name {
            validation::validate_product_name(name)?;
        }
        if let Some(price) = patch.price {
            validation::validate_price(price)?;
        }
        if let Some(barcode) = &patch.barcode {
            validation::validate_barcode(barcode)?;
        }

        if !self.catalog.update_product(product_id, &patch) {
            return Err(CoreError::ProductNotFound(product_id));
        }
        self.outbound.push_back(OutboundWrite::UpdateProduct {
            id: product_id,
            patch,
        });
        Ok(())
    }

    /// Removes a product. Returns `false` for an unknown id.
    pub fn delete_product(&mut self, product_id: i64) -> bool {
        if !self.catalog.delete_product(product_id) {
            return false;
        }
        self.outbound
            .push_back(OutboundWrite::DeleteProduct(product_id));
        true
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    /// Registers a supplier and returns the minted id.
    pub fn add_supplier(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        goods: Vec<String>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        self.suppliers.push(Supplier {
            id: id.clone(),
            name: name.into(),
            phone: phone.into(),
            goods,
        });
        id
    }

    /// Removes a supplier. Unknown ids are ignored.
    pub fn delete_supplier(&mut self, supplier_id: &str) -> bool {
        let before = self.suppliers.len();
        self.suppliers.retain(|s| s.id != supplier_id);
        self.suppliers.len() != before
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.entries()
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.unread_count()
    }

    pub fn mark_notification_read(&mut self, id: &str) {
        self.notifications.mark_read(id);
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    pub fn sales(&self) -> &[Sale] {
        self.ledger.sales()
    }

    pub fn today_sales(&self) -> Vec<&Sale> {
        self.ledger.today_sales()
    }

    pub fn pending_syncs(&self) -> u32 {
        self.ledger.pending_syncs()
    }

    // ========================================================================
    // Replication
    // ========================================================================

    /// Hands the queued writes to the replication worker, leaving the
    /// queue empty. Writes are never requeued.
    pub fn drain_outbound(&mut self) -> Vec<OutboundWrite> {
        self.outbound.drain(..).collect()
    }
}
