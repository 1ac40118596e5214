//! End-to-end engine flows over the in-memory remote doubles

use std::sync::Arc;

use brew_engine::StateManager;
use brew_engine::catalog::Catalog;
use brew_engine::engine::VOUCHER_COST;
use brew_remote_mock::{MockDocumentStore, MockIdentityProvider, MockPreferenceStore};
use rust_decimal::Decimal;
use shared::docs::{COLLECTION_ORDERS, COLLECTION_OWNED_VOUCHERS};
use shared::models::ProductOption;

fn signed_in_manager() -> (StateManager, Arc<MockDocumentStore>, String) {
    let store = Arc::new(MockDocumentStore::new());
    let identity = Arc::new(MockIdentityProvider::new());
    let uid = identity.seed_signed_in("ada@example.com", "pw", Some("Ada"));
    let manager = StateManager::new(
        Catalog::standard(),
        store.clone(),
        identity,
        Arc::new(MockPreferenceStore::new()),
    );
    (manager, store, uid)
}

#[tokio::test]
async fn single_latte_checkout_earns_points_and_a_stamp() {
    let (manager, _store, _uid) = signed_in_manager();

    manager.add_to_cart("Latte", ProductOption::default());
    assert_eq!(manager.cart_total(), Decimal::new(350, 2));

    assert!(manager.check_out(None, 0, Some("VISA")));

    assert_eq!(manager.state().points.get(), 350);
    assert_eq!(manager.state().stamp_count.get(), 1);
    assert!(manager.state().cart.get().is_empty());

    let orders = manager.state().ongoing_orders.get();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].price, Decimal::new(350, 2));

    let history = manager.state().points_history.get();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].points, 350);
}

#[tokio::test]
async fn redemption_spends_points_and_creates_a_free_order() {
    let (manager, _store, _uid) = signed_in_manager();

    // One bulk checkout: 8 x 3.50 = 28.00, 2800 points
    manager.add_to_cart("Latte", ProductOption::default().with_quantity(8));
    assert!(manager.check_out(None, 0, None));
    assert_eq!(manager.state().points.get(), 2800);

    assert!(manager.redeem_drink("r1"));
    assert_eq!(manager.state().points.get(), 300);

    let orders = manager.state().ongoing_orders.get();
    let redeemed = orders.iter().find(|o| o.price == Decimal::ZERO).unwrap();
    assert_eq!(redeemed.product, "Americano");
    assert_eq!(redeemed.payment_method.as_deref(), Some("Points Redemption"));

    // Ledger shows the spend
    let history = manager.state().points_history.get();
    assert_eq!(history.last().unwrap().points, -2500);
}

#[tokio::test]
async fn voucher_lifecycle_from_purchase_to_discounted_checkout() {
    let (manager, store, uid) = signed_in_manager();

    manager.add_to_cart("Latte", ProductOption::default());
    assert!(manager.check_out(None, 0, None)); // 350 points

    assert!(manager.purchase_voucher("v1"));
    assert_eq!(manager.state().points.get(), 350 - VOUCHER_COST);
    assert_eq!(manager.state().owned_vouchers.get()[0].percent_off, 5);

    // Spend the voucher on the next checkout
    manager.add_to_cart("Latte", ProductOption::default());
    assert!(manager.use_voucher("v1"));
    assert!(manager.check_out(None, 5, Some("VISA")));

    let orders = manager.state().ongoing_orders.get();
    let discounted = orders.last().unwrap();
    // 3.50 x 0.95 = 3.325, rounded half-up
    assert_eq!(discounted.price, Decimal::new(333, 2));
    assert_eq!(discounted.coupon_percent, 5);

    // Exhausted voucher is pruned locally and deleted remotely
    assert!(manager.state().owned_vouchers.get().is_empty());
    manager.flush().await.unwrap();
    assert!(store.collection_docs(&uid, COLLECTION_OWNED_VOUCHERS).is_empty());
}

#[tokio::test]
async fn order_partition_moves_survive_a_flush() {
    let (manager, store, uid) = signed_in_manager();

    manager.add_to_cart("Mocha", ProductOption::default());
    assert!(manager.check_out(None, 0, None));
    let id = manager.state().ongoing_orders.get()[0].id.clone();

    manager.move_to_history(&id);
    manager.flush().await.unwrap();

    let docs = store.collection_docs(&uid, COLLECTION_ORDERS);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["status"], "COMPLETED");
}

#[tokio::test]
async fn repeated_checkouts_fill_but_never_overfill_the_stamp_card() {
    let (manager, _store, _uid) = signed_in_manager();

    for _ in 0..9 {
        manager.add_to_cart("Americano", ProductOption::default());
        assert!(manager.check_out(None, 0, None));
    }
    assert_eq!(manager.state().stamp_count.get(), 8);

    assert!(manager.reset_stamp_count().await);
    assert_eq!(manager.state().stamp_count.get(), 0);
}
