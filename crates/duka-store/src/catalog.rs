//! # Catalog Cache
//!
//! The last-fetched product list and the single gate for stock mutation.
//!
//! ## Optimistic Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stock Adjustment Flow                               │
//! │                                                                         │
//! │  adjust_stock(id, delta)                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  new = max(0, stock + delta)      ◄── clamp, never reject              │
//! │        │                                                                │
//! │        ├── local product updated immediately (system of record         │
//! │        │   for the running session)                                     │
//! │        │                                                                │
//! │        └── StockAdjustment returned to the store, which queues the     │
//! │            remote PUT; a failed remote write never rolls this back     │
//! │                                                                         │
//! │  LOW-STOCK RULE: 0 < new ≤ threshold fires an alert.                   │
//! │  Hitting exactly zero fires nothing; "out of stock" is a distinct      │
//! │  condition the UI reads straight off the stock value.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use duka_core::{Money, Product, Quantity, Unit};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// =============================================================================
// Stock Adjustment Result
// =============================================================================

/// Outcome of a stock adjustment, consumed by the store to emit the
/// low-stock notification and queue the remote write.
#[derive(Debug, Clone)]
pub struct StockAdjustment {
    pub product_id: i64,
    pub product_name: String,
    pub new_stock: Quantity,
    /// True when the adjustment landed in the alert band
    /// (above zero, at or below the threshold).
    pub low_stock: bool,
}

// =============================================================================
// Product Patch
// =============================================================================

/// Partial product update, applied locally and PUT to the remote store.
///
/// Serializes with absent fields omitted, so a stock-only reconciliation
/// is exactly `{"stock": 118000}` on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<Quantity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<Quantity>,
}

impl ProductPatch {
    /// A patch carrying only a stock level.
    pub fn stock(stock: Quantity) -> Self {
        ProductPatch {
            stock: Some(stock),
            ..ProductPatch::default()
        }
    }

    fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(unit) = self.unit {
            product.unit = unit;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(barcode) = &self.barcode {
            product.barcode = barcode.clone();
        }
        if let Some(threshold) = self.low_stock_threshold {
            product.low_stock_threshold = threshold;
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The session's product list.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            products: Vec::new(),
        }
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Replaces the entire list with a fresh remote fetch.
    /// No merge logic: last fetch wins.
    pub fn replace_all(&mut self, products: Vec<Product>) {
        info!(count = products.len(), "Catalog refreshed");
        self.products = products;
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Barcode lookup for scanner entry. Barcodes are unique within one
    /// business, so first match wins.
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.barcode == barcode)
    }

    /// Case-insensitive substring search over name and category.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Products at or below their restock threshold.
    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Applies a signed stock delta, flooring the result at zero.
    ///
    /// Returns `None` for an unknown product id (no state change). The
    /// caller decides what to do with the low-stock flag; this method only
    /// computes it.
    pub fn adjust_stock(&mut self, product_id: i64, delta: Quantity) -> Option<StockAdjustment> {
        let product = self.products.iter_mut().find(|p| p.id == product_id)?;

        let new_stock = product.stock.saturating_adjust(delta);
        product.stock = new_stock;

        let low_stock = new_stock.is_positive() && new_stock <= product.low_stock_threshold;

        debug!(
            product_id,
            name = %product.name,
            %delta,
            %new_stock,
            low_stock,
            "Stock adjusted"
        );

        Some(StockAdjustment {
            product_id,
            product_name: product.name.clone(),
            new_stock,
            low_stock,
        })
    }

    /// Adds a product to the local list.
    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Applies a partial update. Returns false for an unknown id.
    pub fn update_product(&mut self, product_id: i64, patch: &ProductPatch) -> bool {
        match self.products.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                patch.apply_to(product);
                true
            }
            None => false,
        }
    }

    /// Removes a product. Returns false for an unknown id.
    pub fn delete_product(&mut self, product_id: i64) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != product_id);
        self.products.len() != before
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
