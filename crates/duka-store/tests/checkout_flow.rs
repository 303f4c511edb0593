//! End-to-end checkout flows against a full store: sign-in, shift,
//! multi-tab carts, checkout side effects, offline bookkeeping and the
//! snapshot round trip.

use duka_core::{Cashier, CashierRole, Money, NotificationKind, PaymentMethod, Product, Quantity, Unit};
use duka_store::{PosStore, ProductPatch};

fn catalog() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Unga Pembe 2kg".to_string(),
            category: "Flour".to_string(),
            price: Money::from_shillings(210),
            unit: Unit::Piece,
            stock: Quantity::from_whole(40),
            barcode: "6161100110015".to_string(),
            low_stock_threshold: Quantity::from_whole(10),
        },
        Product {
            id: 2,
            name: "Sukari Nguru 1kg".to_string(),
            category: "Sugar".to_string(),
            price: Money::from_shillings(175),
            unit: Unit::Kilogram,
            stock: Quantity::from_whole(25),
            barcode: "6161100110022".to_string(),
            low_stock_threshold: Quantity::from_whole(8),
        },
        Product {
            id: 3,
            name: "Coca-Cola 500ml".to_string(),
            category: "Beverages".to_string(),
            price: Money::from_shillings(70),
            unit: Unit::Bottle,
            stock: Quantity::from_whole(4),
            barcode: "6161100110039".to_string(),
            low_stock_threshold: Quantity::from_whole(6),
        },
    ]
}

fn amina() -> Cashier {
    Cashier {
        id: "cashier-001".to_string(),
        name: "Amina".to_string(),
        role: CashierRole::Cashier,
    }
}

fn open_register() -> PosStore {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut store = PosStore::new();
    store.replace_products(catalog());
    store.set_cashier(amina());
    assert!(store.start_shift());
    store.drain_outbound();
    store
}

#[test]
fn test_full_cash_checkout() {
    let mut store = open_register();

    assert!(store.add_to_cart(1, Quantity::from_whole(2)));
    assert_eq!(store.cart_total(), Money::from_shillings(420));

    let sale = store.complete_sale(PaymentMethod::Cash, None).unwrap();

    assert!(store.cart_items().is_empty());
    assert_eq!(store.product(1).unwrap().stock, Quantity::from_whole(38));
    assert_eq!(store.sales().len(), 1);
    assert_eq!(sale.total, Money::from_shillings(420));
    assert_eq!(sale.cashier_name, "Amina");
    assert!(sale.synced);

    let top = &store.notifications()[0];
    assert_eq!(top.kind, NotificationKind::Payment);
    assert_eq!(top.title, "Sale Complete");
    assert_eq!(top.message, "KES 420.00 via Cash");
}

#[test]
fn test_fractional_quantity_checkout() {
    let mut store = open_register();

    // 1.5 kg of sugar at KES 175/kg.
    assert!(store.add_to_cart(2, Quantity::from_milli(1_500)));
    let sale = store.complete_sale(PaymentMethod::Cash, None).unwrap();

    assert_eq!(sale.total, Money::from_cents(26_250));
    assert_eq!(
        store.product(2).unwrap().stock,
        Quantity::from_milli(23_500)
    );
}

#[test]
fn test_checkout_fires_low_stock_alert() {
    let mut store = open_register();

    store.add_to_cart(3, Quantity::from_whole(2));
    store.complete_sale(PaymentMethod::Cash, None).unwrap();

    // 4 - 2 = 2, inside the alert band (0 < 2 <= 6).
    let alert = store
        .notifications()
        .iter()
        .find(|n| n.kind == NotificationKind::LowStock)
        .expect("low stock alert");
    assert_eq!(alert.message, "Coca-Cola 500ml is running low (2 left)");
}

#[test]
fn test_tabs_are_independent_through_checkout() {
    let mut store = open_register();

    store.add_to_cart(1, Quantity::from_whole(1));
    let second = store.add_tab();
    store.add_to_cart(3, Quantity::from_whole(1));

    // Checking out the second customer leaves the first tab untouched.
    store.complete_sale(PaymentMethod::Cash, None).unwrap();
    assert!(store.cart_items().is_empty());

    let first_id = store
        .cart_tabs()
        .iter()
        .find(|t| t.id != second)
        .map(|t| t.id.clone())
        .unwrap();
    store.switch_tab(&first_id);
    assert_eq!(store.cart_items().len(), 1);
    assert_eq!(store.cart_total(), Money::from_shillings(210));
}

#[test]
fn test_offline_sales_then_reconnect() {
    let mut store = open_register();
    store.set_online(false);

    for _ in 0..3 {
        store.add_to_cart(1, Quantity::from_whole(1));
        let sale = store.complete_sale(PaymentMethod::Cash, None).unwrap();
        assert!(!sale.synced);
    }
    assert_eq!(store.pending_syncs(), 3);

    store.set_online(true);

    assert_eq!(store.pending_syncs(), 0);
    assert!(store.sales().iter().all(|s| s.synced));
    let syncs: Vec<_> = store
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Sync)
        .collect();
    assert_eq!(syncs.len(), 1);
    assert_eq!(syncs[0].message, "3 sales synced successfully");
}

#[test]
fn test_restored_pending_sales_reconcile_on_online_signal() {
    let mut store = open_register();
    store.set_online(false);
    store.add_to_cart(1, Quantity::from_whole(1));
    store.complete_sale(PaymentMethod::Cash, None).unwrap();
    assert_eq!(store.pending_syncs(), 1);

    let mut resumed = PosStore::from_snapshot(store.snapshot());
    assert_eq!(resumed.pending_syncs(), 1);

    // The restored process never saw an offline state, but the next
    // online signal must still reconcile the pending sale.
    resumed.set_online(true);

    assert_eq!(resumed.pending_syncs(), 0);
    assert!(resumed.sales().iter().all(|s| s.synced));
    let syncs: Vec<_> = resumed
        .notifications()
        .iter()
        .filter(|n| n.kind == NotificationKind::Sync)
        .collect();
    assert_eq!(syncs.len(), 1);
    assert_eq!(syncs[0].message, "1 sales synced successfully");
}

#[test]
fn test_checkout_queues_replication_writes() {
    let mut store = open_register();

    store.add_to_cart(1, Quantity::from_whole(2));
    store.add_to_cart(2, Quantity::from_whole(1));
    store
        .complete_sale(PaymentMethod::MobileMoney, Some("QGH7X2K9P1".to_string()))
        .unwrap();

    let kinds: Vec<_> = store.drain_outbound().iter().map(|w| w.kind()).collect();
    assert_eq!(
        kinds,
        vec!["update_product", "update_product", "create_sale"]
    );
    assert!(store.drain_outbound().is_empty());
}

#[test]
fn test_shift_end_blocks_further_sales() {
    let mut store = open_register();

    let ended = store.end_shift().unwrap();
    assert!(ended.end_time.is_some());
    assert_eq!(store.shift_history().len(), 1);

    store.add_to_cart(1, Quantity::from_whole(1));
    assert!(store.complete_sale(PaymentMethod::Cash, None).is_none());

    // A fresh shift re-enables checkout.
    assert!(store.start_shift());
    assert!(store.complete_sale(PaymentMethod::Cash, None).is_some());
}

#[test]
fn test_restart_resumes_mid_shift() {
    let mut store = open_register();
    store.set_online(false);
    store.add_to_cart(1, Quantity::from_whole(1));
    store.complete_sale(PaymentMethod::Cash, None).unwrap();
    store.add_to_cart(2, Quantity::from_whole(2));

    let mut resumed = PosStore::from_snapshot(store.snapshot());

    // Durable state survives: shift, pending sale, half-built cart.
    assert!(resumed.shift_open());
    assert_eq!(resumed.pending_syncs(), 1);
    assert_eq!(resumed.cart_items().len(), 1);
    assert_eq!(resumed.product(1).unwrap().stock, Quantity::from_whole(39));

    // Session does not survive; the cashier signs back in and continues.
    assert!(resumed.session().is_none());
    resumed.set_cashier(amina());
    assert!(resumed.complete_sale(PaymentMethod::Cash, None).is_some());
}

#[test]
fn test_product_edit_round_trips_through_patch() {
    let mut store = open_register();

    let patch = ProductPatch {
        price: Some(Money::from_shillings(220)),
        ..ProductPatch::default()
    };
    store.update_product(1, patch).unwrap();
    assert_eq!(
        store.product(1).unwrap().price,
        Money::from_shillings(220)
    );

    store.add_to_cart(1, Quantity::from_whole(1));
    let sale = store.complete_sale(PaymentMethod::Cash, None).unwrap();
    assert_eq!(sale.total, Money::from_shillings(220));
}
