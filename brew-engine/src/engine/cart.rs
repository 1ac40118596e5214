//! Cart operations

use shared::models::{CartItem, ProductOption};
use shared::util::new_id;

use crate::pricing;

use super::manager::StateManager;

impl StateManager {
    /// Add a line to the cart
    ///
    /// A line with the same product and option shape (everything except
    /// quantity) is merged: quantities sum and the price is recomputed
    /// for the merged quantity. Anything else appends a new line.
    pub fn add_to_cart(&self, product: &str, option: ProductOption) {
        let _gate = self.gate();
        let mut cart = self.state().cart.get();

        let existing = cart
            .iter_mut()
            .find(|item| item.product == product && item.option.same_shape(&option));

        match existing {
            Some(item) => {
                let quantity = item.option.quantity + option.quantity;
                item.option = item.option.with_quantity(quantity);
                item.price = pricing::quote(product, &item.option);
                tracing::debug!(product, quantity, "cart line merged");
            }
            None => {
                let price = pricing::quote(product, &option);
                cart.push(CartItem {
                    id: new_id(),
                    product: product.to_string(),
                    price,
                    option,
                });
                tracing::debug!(product, items = cart.len(), "cart line added");
            }
        }

        self.state().cart.set(cart);
        self.schedule_sync();
    }

    /// Remove a line; `false` when no line has that id (no sync either)
    pub fn remove_from_cart(&self, item_id: &str) -> bool {
        let _gate = self.gate();
        let mut cart = self.state().cart.get();
        let before = cart.len();
        cart.retain(|item| item.id != item_id);
        if cart.len() == before {
            return false;
        }
        tracing::debug!(item_id, "cart line removed");
        self.state().cart.set(cart);
        self.schedule_sync();
        true
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shared::models::{ProductOption, SizeType};

    use crate::engine::test_support::test_manager;

    #[test]
    fn add_merges_identical_shapes() {
        let manager = test_manager();
        let option = ProductOption::default();

        manager.add_to_cart("Latte", option.with_quantity(1));
        manager.add_to_cart("Latte", option.with_quantity(2));

        let cart = manager.state().cart.get();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].option.quantity, 3);
        // 3.50 * 3
        assert_eq!(cart[0].price, Decimal::new(1050, 2));
    }

    #[test]
    fn add_keeps_distinct_shapes_separate() {
        let manager = test_manager();
        let option = ProductOption::default();
        let large = ProductOption {
            size: SizeType::Large,
            ..option.clone()
        };

        manager.add_to_cart("Latte", option);
        manager.add_to_cart("Latte", large);

        assert_eq!(manager.state().cart.get().len(), 2);
    }

    #[test]
    fn add_keeps_different_products_separate() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        manager.add_to_cart("Americano", ProductOption::default());
        assert_eq!(manager.state().cart.get().len(), 2);
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        assert!(!manager.remove_from_cart("not-an-id"));
        assert_eq!(manager.state().cart.get().len(), 1);
    }

    #[test]
    fn remove_known_id() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        let id = manager.state().cart.get()[0].id.clone();
        assert!(manager.remove_from_cart(&id));
        assert!(manager.state().cart.get().is_empty());
    }

    #[test]
    fn cart_total_is_sum_of_line_prices() {
        let manager = test_manager();
        manager.add_to_cart("Latte", ProductOption::default());
        manager.add_to_cart("Americano", ProductOption::default());
        assert_eq!(manager.cart_total(), Decimal::new(600, 2));
    }
}
