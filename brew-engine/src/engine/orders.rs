//! Checkout and the order partitions

use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{Order, OrderStatus};
use shared::util::{new_id, now_datetime};

use super::manager::StateManager;

/// Round a discounted line price to 2 decimals, half-up
/// (`MidpointAwayFromZero`); the one rounding point of the whole engine
fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl StateManager {
    /// Convert the whole cart into ONGOING orders
    ///
    /// `false` (nothing changes) on an empty cart. Every line becomes
    /// one order at its discounted, rounded price; points accrue per
    /// line on that rounded price; all lines share one timestamp; the
    /// whole call awards exactly one stamp; the cart is cleared.
    ///
    /// Voucher-based discounts are the caller's concern: resolve the
    /// percent from the voucher and consume it once via
    /// [`StateManager::use_voucher`], regardless of the line count.
    pub fn check_out(
        &self,
        address_override: Option<&str>,
        discount_percent: u8,
        payment_method: Option<&str>,
    ) -> bool {
        let _gate = self.gate();
        let cart = self.state().cart.get();
        if cart.is_empty() {
            return false;
        }

        let address = address_override
            .map(str::to_string)
            .unwrap_or_else(|| self.state().delivery_location.get());
        let datetime = now_datetime();
        // Discount percent is 0..=100; anything above would price lines
        // below zero
        let discount_percent = discount_percent.min(100);
        let factor = Decimal::ONE - Decimal::from(discount_percent) / Decimal::from(100u32);

        let mut orders = Vec::with_capacity(cart.len());
        for item in &cart {
            let price = round_price(item.price * factor);
            self.add_points(price, &item.product, &datetime);
            orders.push(Order {
                id: new_id(),
                product: item.product.clone(),
                datetime: datetime.clone(),
                price,
                address: address.clone(),
                option: item.option.clone(),
                payment_method: payment_method.map(str::to_string),
                coupon_percent: discount_percent,
                status: OrderStatus::Ongoing,
            });
        }

        self.award_stamp();
        let created = orders.len();
        self.state()
            .ongoing_orders
            .update(|ongoing| ongoing.extend(orders));
        self.state().cart.set(Vec::new());

        tracing::debug!(
            orders = created,
            discount_percent,
            stamps = self.state().stamp_count.get(),
            "checkout complete"
        );
        self.schedule_sync();
        true
    }

    /// Mark an ongoing order COMPLETED and move it to history.
    /// Silent no-op when the id is not in the ongoing partition.
    pub fn move_to_history(&self, order_id: &str) {
        let _gate = self.gate();
        let mut ongoing = self.state().ongoing_orders.get();
        let Some(index) = ongoing.iter().position(|o| o.id == order_id) else {
            return;
        };
        let mut order = ongoing.remove(index);
        order.status = OrderStatus::Completed;
        self.state().ongoing_orders.set(ongoing);
        self.state().history_orders.update(|history| history.push(order));
        tracing::debug!(order_id, "order moved to history");
        self.schedule_sync();
    }

    /// Move a history order back to ONGOING (correction path)
    pub fn move_to_ongoing(&self, order_id: &str) {
        let _gate = self.gate();
        let mut history = self.state().history_orders.get();
        let Some(index) = history.iter().position(|o| o.id == order_id) else {
            return;
        };
        let mut order = history.remove(index);
        order.status = OrderStatus::Ongoing;
        self.state().history_orders.set(history);
        self.state().ongoing_orders.update(|ongoing| ongoing.push(order));
        tracing::debug!(order_id, "order moved back to ongoing");
        self.schedule_sync();
    }

    /// Delete an order from history; ongoing orders cannot be deleted
    pub fn remove_history_order(&self, order_id: &str) {
        let _gate = self.gate();
        let mut history = self.state().history_orders.get();
        let before = history.len();
        history.retain(|o| o.id != order_id);
        if history.len() == before {
            return;
        }
        self.state().history_orders.set(history);
        tracing::debug!(order_id, "order removed from history");
        self.schedule_sync();
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shared::models::{OrderStatus, ProductOption, SizeType};

    use crate::engine::test_support::test_manager;

    #[test]
    fn empty_cart_checkout_is_rejected() {
        let manager = test_manager();
        assert!(!manager.check_out(None, 0, None));
        assert_eq!(manager.state().stamp_count.get(), 0);
    }

    #[test]
    fn checkout_creates_one_order_per_line_with_shared_timestamp() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        manager.add_to_cart(
            "Americano",
            ProductOption {
                size: SizeType::Large,
                ..ProductOption::default()
            },
        );

        assert!(manager.check_out(Some("1 Demo Lane"), 0, Some("VISA")));

        let orders = manager.state().ongoing_orders.get();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].datetime, orders[1].datetime);
        assert!(orders.iter().all(|o| o.address == "1 Demo Lane"));
        assert!(orders.iter().all(|o| o.payment_method.as_deref() == Some("VISA")));
        assert!(manager.state().cart.get().is_empty());
        // One stamp for the whole call, not one per line
        assert_eq!(manager.state().stamp_count.get(), 1);
    }

    #[test]
    fn checkout_discount_rounds_half_up_and_accrues_on_rounded_price() {
        let manager = test_manager();
        // 3.50, 5% off -> 3.325 -> 3.33 (half-up)
        manager.add_to_cart("Latte", ProductOption::default());
        assert!(manager.check_out(None, 5, None));

        let orders = manager.state().ongoing_orders.get();
        assert_eq!(orders[0].price, Decimal::new(333, 2));
        assert_eq!(orders[0].coupon_percent, 5);
        // floor(3.33 x 100)
        assert_eq!(manager.state().points.get(), 333);
    }

    #[test]
    fn discount_is_capped_at_one_hundred_percent() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        assert!(manager.check_out(None, 255, None));

        let orders = manager.state().ongoing_orders.get();
        assert_eq!(orders[0].price, Decimal::ZERO);
        assert_eq!(orders[0].coupon_percent, 100);
        assert_eq!(manager.state().points.get(), 0);
    }

    #[test]
    fn stamps_cap_at_eight() {
        let manager = test_manager();
        for _ in 0..10 {
            manager.add_to_cart("Latte", ProductOption::default());
            assert!(manager.check_out(None, 0, None));
        }
        assert_eq!(manager.state().stamp_count.get(), 8);
    }

    #[test]
    fn checkout_uses_profile_address_by_default() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        assert!(manager.check_out(None, 0, None));
        let orders = manager.state().ongoing_orders.get();
        assert_eq!(orders[0].address, manager.state().delivery_location.get());
    }

    #[test]
    fn order_moves_between_partitions() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        assert!(manager.check_out(None, 0, None));
        let id = manager.state().ongoing_orders.get()[0].id.clone();

        manager.move_to_history(&id);
        assert!(manager.state().ongoing_orders.get().is_empty());
        let history = manager.state().history_orders.get();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, OrderStatus::Completed);

        manager.move_to_ongoing(&id);
        assert!(manager.state().history_orders.get().is_empty());
        let ongoing = manager.state().ongoing_orders.get();
        assert_eq!(ongoing.len(), 1);
        assert_eq!(ongoing[0].status, OrderStatus::Ongoing);
    }

    #[test]
    fn move_with_unknown_id_is_a_noop() {
        let manager = test_manager();
        manager.move_to_history("nope");
        manager.move_to_ongoing("nope");
        manager.remove_history_order("nope");
        assert!(manager.state().ongoing_orders.get().is_empty());
        assert!(manager.state().history_orders.get().is_empty());
    }

    #[test]
    fn history_orders_can_be_deleted() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        assert!(manager.check_out(None, 0, None));
        let id = manager.state().ongoing_orders.get()[0].id.clone();
        manager.move_to_history(&id);

        manager.remove_history_order(&id);
        assert!(manager.state().history_orders.get().is_empty());
    }
}
