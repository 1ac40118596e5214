//! Redemption and voucher market

use rust_decimal::Decimal;
use shared::models::{Order, OrderStatus, ProductOption, VoucherOwned};
use shared::util::{new_id, now_datetime};

use super::manager::StateManager;

/// Fixed point cost of any voucher
pub const VOUCHER_COST: u64 = 300;

impl StateManager {
    /// Exchange points for a redeemable drink
    ///
    /// On success the points are deducted, a negative ledger entry is
    /// appended and a zero-price ONGOING order with the default option
    /// set is created. `false` (state untouched) on unknown id or
    /// insufficient points.
    pub fn redeem_drink(&self, redeemable_id: &str) -> bool {
        let _gate = self.gate();
        let Some(redeemable) = self
            .state()
            .redeemables
            .get()
            .into_iter()
            .find(|r| r.id == redeemable_id)
        else {
            return false;
        };

        let points = self.state().points.get();
        if points < redeemable.points_required {
            tracing::warn!(
                product = %redeemable.product,
                required = redeemable.points_required,
                points,
                "insufficient points for redemption"
            );
            return false;
        }
        self.state().points.set(points - redeemable.points_required);

        let datetime = now_datetime();
        self.record_points_spent(
            &format!("Redeemed {}", redeemable.product),
            &datetime,
            redeemable.points_required,
        );

        let order = Order {
            id: new_id(),
            product: redeemable.product.clone(),
            datetime,
            price: Decimal::ZERO,
            address: self.state().delivery_location.get(),
            option: ProductOption::default(),
            payment_method: Some("Points Redemption".to_string()),
            coupon_percent: 0,
            status: OrderStatus::Ongoing,
        };
        self.state().ongoing_orders.update(|orders| orders.push(order));

        tracing::debug!(
            product = %redeemable.product,
            remaining = self.state().points.get(),
            "drink redeemed"
        );
        self.schedule_sync();
        true
    }

    /// Buy one voucher of the given type for [`VOUCHER_COST`] points
    ///
    /// Increments the owned quantity (creating the entry when needed,
    /// pruning stale zero-quantity duplicates first), makes sure the
    /// template is present in the coupon catalog, and appends a negative
    /// ledger entry.
    pub fn purchase_voucher(&self, voucher_id: &str) -> bool {
        let _gate = self.gate();
        let Some(template) = self
            .state()
            .available_vouchers
            .get()
            .into_iter()
            .find(|v| v.id == voucher_id)
        else {
            return false;
        };

        let points = self.state().points.get();
        if points < VOUCHER_COST {
            tracing::warn!(required = VOUCHER_COST, points, "insufficient points for voucher");
            return false;
        }
        self.state().points.set(points - VOUCHER_COST);

        self.state().owned_vouchers.update(|owned| {
            owned.retain(|v| v.quantity > 0);
            match owned.iter_mut().find(|v| v.voucher_id == template.id) {
                Some(entry) => entry.quantity += 1,
                None => owned.push(VoucherOwned {
                    voucher_id: template.id.clone(),
                    label: template.label.clone(),
                    percent_off: template.percent_off,
                    quantity: 1,
                }),
            }
        });
        // Owned again, so no pending remote delete
        self.state().spent_vouchers.lock().remove(&template.id);

        self.state().coupons.update(|coupons| {
            if !coupons.iter().any(|c| c.id == template.id) {
                coupons.push(template.clone());
            }
        });

        let datetime = now_datetime();
        self.record_points_spent(&format!("Voucher {}", template.label), &datetime, VOUCHER_COST);

        tracing::debug!(
            label = %template.label,
            remaining = self.state().points.get(),
            "voucher purchased"
        );
        self.schedule_sync();
        true
    }

    /// Consume one voucher of the given type
    ///
    /// At most one call per checkout: voucher consumption is
    /// per-checkout, not per line. Entries reaching quantity 0 are
    /// pruned and queued for remote deletion.
    pub fn use_voucher(&self, voucher_id: &str) -> bool {
        let _gate = self.gate();
        let mut owned = self.state().owned_vouchers.get();
        let Some(index) = owned.iter().position(|v| v.voucher_id == voucher_id) else {
            return false;
        };
        if owned[index].quantity == 0 {
            return false;
        }

        owned[index].quantity -= 1;
        let remaining = owned[index].quantity;
        if remaining == 0 {
            owned.remove(index);
            self.state()
                .spent_vouchers
                .lock()
                .insert(voucher_id.to_string());
        }
        self.state().owned_vouchers.set(owned);

        tracing::debug!(voucher_id, remaining, "voucher used");
        self.schedule_sync();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::test_support::test_manager;
    use shared::models::ProductOption;

    use super::VOUCHER_COST;

    /// Earn points by checking out; 3.50 x 100 = 350 points per latte
    fn earn_points(manager: &crate::StateManager, lattes: u32) {
        manager.add_to_cart("Latte", ProductOption::default().with_quantity(lattes));
        assert!(manager.check_out(None, 0, None));
    }

    #[test]
    fn redeem_rejected_without_enough_points() {
        let manager = test_manager();
        assert!(!manager.redeem_drink("r1"));
        assert_eq!(manager.state().points.get(), 0);
        assert!(manager.state().ongoing_orders.get().is_empty());
        assert!(manager.state().points_history.get().is_empty());
    }

    #[test]
    fn redeem_unknown_id_is_rejected() {
        let manager = test_manager();
        earn_points(&manager, 8);
        assert!(!manager.redeem_drink("r99"));
        assert_eq!(manager.state().points.get(), 2800);
    }

    #[test]
    fn redeem_creates_zero_price_order_and_ledger_entry() {
        let manager = test_manager();
        earn_points(&manager, 8); // 2800 points
        assert!(manager.redeem_drink("r1")); // Americano, 2500

        assert_eq!(manager.state().points.get(), 300);
        let orders = manager.state().ongoing_orders.get();
        let redeemed = orders.last().unwrap();
        assert_eq!(redeemed.product, "Americano");
        assert_eq!(redeemed.price, rust_decimal::Decimal::ZERO);
        assert_eq!(redeemed.payment_method.as_deref(), Some("Points Redemption"));

        let history = manager.state().points_history.get();
        let entry = history.last().unwrap();
        assert_eq!(entry.points, -2500);
        assert_eq!(entry.product, "Redeemed Americano");

        // A second redemption no longer fits the balance
        assert!(!manager.redeem_drink("r1"));
        assert_eq!(manager.state().points.get(), 300);
    }

    #[test]
    fn purchase_voucher_deducts_and_stocks() {
        let manager = test_manager();
        earn_points(&manager, 1); // 350 points
        assert!(manager.purchase_voucher("v1"));

        assert_eq!(manager.state().points.get(), 350 - VOUCHER_COST);
        let owned = manager.state().owned_vouchers.get();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].voucher_id, "v1");
        assert_eq!(owned[0].quantity, 1);

        // Template appended to the coupon catalog exactly once
        let coupons = manager.state().coupons.get();
        assert_eq!(coupons.iter().filter(|c| c.id == "v1").count(), 1);

        assert_eq!(manager.state().points_history.get().last().unwrap().points, -300);
    }

    #[test]
    fn purchase_rejected_without_enough_points() {
        let manager = test_manager();
        assert!(!manager.purchase_voucher("v1"));
        assert!(manager.state().owned_vouchers.get().is_empty());
    }

    #[test]
    fn repeat_purchase_increments_quantity() {
        let manager = test_manager();
        earn_points(&manager, 2); // 700 points
        assert!(manager.purchase_voucher("v1"));
        assert!(manager.purchase_voucher("v1"));

        let owned = manager.state().owned_vouchers.get();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].quantity, 2);
        let coupons = manager.state().coupons.get();
        assert_eq!(coupons.iter().filter(|c| c.id == "v1").count(), 1);
    }

    #[test]
    fn use_voucher_prunes_at_zero() {
        let manager = test_manager();
        earn_points(&manager, 1);
        assert!(manager.purchase_voucher("v1"));

        assert!(manager.use_voucher("v1"));
        assert!(manager.state().owned_vouchers.get().is_empty());
        assert!(manager.state().spent_vouchers.lock().contains("v1"));

        // Exhausted: further use is rejected
        assert!(!manager.use_voucher("v1"));
    }

    #[test]
    fn use_voucher_unknown_id_is_rejected() {
        let manager = test_manager();
        assert!(!manager.use_voucher("v1"));
    }

    #[test]
    fn repurchase_clears_pending_remote_delete() {
        let manager = test_manager();
        earn_points(&manager, 2);
        assert!(manager.purchase_voucher("v1"));
        assert!(manager.use_voucher("v1"));
        assert!(manager.purchase_voucher("v1"));
        assert!(!manager.state().spent_vouchers.lock().contains("v1"));
    }
}
