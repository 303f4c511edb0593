//! # Domain Types
//!
//! Core domain types used throughout Duka POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartTab      │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (remote)    │   │  id, label      │   │  id (session)   │       │
//! │  │  price (Money)  │   │  items:         │   │  items snapshot │       │
//! │  │  stock (Qty)    │   │   Vec<CartItem> │   │  total, synced  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Shift       │   │  Notification   │   │    Supplier     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  cashier, start │   │  kind, title    │   │  name, phone    │       │
//! │  │  end (Option)   │   │  read, bounded  │   │  goods list     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Product ids are integers assigned by the remote store (stable within a
//! business). Everything created on-device (sales, shifts, notifications,
//! suppliers) carries a string id minted locally, so the terminal keeps
//! working offline without id coordination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::quantity::Quantity;

// =============================================================================
// Unit of Measure
// =============================================================================

/// How a product is counted or measured.
///
/// The wire names match the remote store's catalog
/// (`"pcs"`, `"kg"`, `"liters"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "pcs")]
    Piece,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "bottles")]
    Bottle,
    #[serde(rename = "sachets")]
    Sachet,
    #[serde(rename = "trays")]
    Tray,
    #[serde(rename = "liters")]
    Litre,
}

impl Unit {
    /// Whether fractional quantities make sense for this unit.
    ///
    /// Weight and volume goods sell in fractions; counted goods do not.
    pub const fn is_fractional(&self) -> bool {
        matches!(self, Unit::Kilogram | Unit::Gram | Unit::Litre)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Owned by the catalog cache; `stock` is mutated locally first and
/// reconciled with the remote store best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Remote-assigned identifier, stable within one business.
    pub id: i64,

    /// Display name shown to the cashier and on the receipt.
    pub name: String,

    /// Catalog category ("Bakery", "Beverages", ...).
    pub category: String,

    /// Unit price in minor units.
    pub price: Money,

    /// Unit of measure.
    pub unit: Unit,

    /// Current stock level. Non-negative by the catalog's clamp rule.
    pub stock: Quantity,

    /// Barcode. Unique within one business, not across businesses.
    pub barcode: String,

    /// Stock level at or below which a restock alert fires.
    pub low_stock_threshold: Quantity,
}

impl Product {
    /// Whether the stock level is at or below the restock threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A line in a cart: a product snapshot paired with a quantity.
///
/// The full product is carried (not just the id) so a tab parked while the
/// catalog refreshes still renders and totals consistently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    pub quantity: Quantity,
}

impl CartItem {
    pub fn new(product: Product, quantity: Quantity) -> Self {
        CartItem { product, quantity }
    }

    /// Line total: unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.for_quantity(self.quantity)
    }
}

/// One of several independently tracked carts, so a cashier can serve
/// multiple customers interleaved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTab {
    pub id: String,
    pub label: String,
    pub items: Vec<CartItem>,
}

// =============================================================================
// Payment & Sale
// =============================================================================

/// How a sale was tendered.
///
/// Wire names are kebab-case (`"cash"`, `"mobile-money"`), matching the
/// other wire enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// Mobile-money transfer confirmed by the external payment provider.
    MobileMoney,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::MobileMoney => write!(f, "Mobile Money"),
        }
    }
}

/// A finalized sale.
///
/// Immutable once created, except for the `synced` flag flipping
/// false→true when connectivity reconciliation runs. Items are a snapshot
/// of the cart at finalize time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Time-derived id, unique within the session (`sale-<epoch-ms>`).
    pub id: String,
    pub items: Vec<CartItem>,
    pub total: Money,
    pub payment_method: PaymentMethod,
    /// Confirmation reference from the payment provider, if any.
    pub payment_ref: Option<String>,
    pub cashier_id: String,
    pub cashier_name: String,
    pub timestamp: DateTime<Utc>,
    /// Whether the remote store is believed to have this record.
    pub synced: bool,
}

// =============================================================================
// Shift
// =============================================================================

/// A bounded working session for one cashier.
///
/// Checkout is blocked unless a shift is open; see the shift tracker in
/// `duka-store` for the gating rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub cashier_id: String,
    pub cashier_name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Shift {
    /// A shift with no end time is still running.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

// =============================================================================
// Notification
// =============================================================================

/// Notification categories consumed by UI badges.
///
/// Wire names match the feed the UI already renders
/// (`"low-stock"`, `"payment"`, `"sync"`, `"info"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    LowStock,
    Payment,
    Sync,
    Info,
}

/// One entry in the append-only notification feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Supplier
// =============================================================================

/// Administrative supplier record. Create/delete only, no lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub goods: Vec<String>,
}

// =============================================================================
// Cashier Identity
// =============================================================================

/// Roles the external auth service assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashierRole {
    Admin,
    Owner,
    Cashier,
    Developer,
}

/// The identity the external PIN-auth collaborator returns on login.
///
/// This core never verifies PINs; it only consumes the resulting identity
/// to gate shift and sale operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashier {
    pub id: String,
    pub name: String,
    pub role: CashierRole,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn soda() -> Product {
        Product {
            id: 6,
            name: "Coca-Cola 500ml".to_string(),
            category: "Beverages".to_string(),
            price: Money::from_shillings(70),
            unit: Unit::Bottle,
            stock: Quantity::from_whole(120),
            barcode: "100006".to_string(),
            low_stock_threshold: Quantity::from_whole(24),
        }
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::new(soda(), Quantity::from_whole(2));
        assert_eq!(item.line_total(), Money::from_shillings(140));
    }

    #[test]
    fn test_unit_fractional() {
        assert!(Unit::Kilogram.is_fractional());
        assert!(Unit::Litre.is_fractional());
        assert!(!Unit::Piece.is_fractional());
        assert!(!Unit::Tray.is_fractional());
    }

    #[test]
    fn test_unit_wire_names() {
        assert_eq!(serde_json::to_string(&Unit::Piece).unwrap(), "\"pcs\"");
        assert_eq!(serde_json::to_string(&Unit::Litre).unwrap(), "\"liters\"");
        let unit: Unit = serde_json::from_str("\"trays\"").unwrap();
        assert_eq!(unit, Unit::Tray);
    }

    #[test]
    fn test_payment_method_wire_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cash).unwrap(), "\"cash\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::MobileMoney).unwrap(),
            "\"mobile-money\""
        );
        let method: PaymentMethod = serde_json::from_str("\"mobile-money\"").unwrap();
        assert_eq!(method, PaymentMethod::MobileMoney);
    }

    #[test]
    fn test_notification_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&NotificationKind::LowStock).unwrap(),
            "\"low-stock\""
        );
    }

    #[test]
    fn test_shift_is_open() {
        let mut shift = Shift {
            id: "shift-1".to_string(),
            cashier_id: "cashier-001".to_string(),
            cashier_name: "Rosemary".to_string(),
            start_time: Utc::now(),
            end_time: None,
        };
        assert!(shift.is_open());
        shift.end_time = Some(Utc::now());
        assert!(!shift.is_open());
    }

    #[test]
    fn test_low_stock_check() {
        let mut product = soda();
        assert!(!product.is_low_stock());
        product.stock = Quantity::from_whole(24);
        assert!(product.is_low_stock());
    }
}
