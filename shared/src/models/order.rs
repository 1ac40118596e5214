//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::ProductOption;

/// Order status
///
/// Every order lives in exactly one of the two partitions: ONGOING orders
/// in the ongoing list, COMPLETED orders in history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Ongoing,
    Completed,
}

/// A placed order line
///
/// Created by checkout (one per cart line) or by redemption (price 0).
/// After creation only `status` ever changes; price, product and option
/// are immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub product: String,
    /// Display timestamp, `dd/MM/yyyy HH:mm`, shared by all lines of one
    /// checkout
    pub datetime: String,
    /// Discounted and rounded to 2 decimals at checkout
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub address: String,
    pub option: ProductOption,
    pub payment_method: Option<String>,
    pub coupon_percent: u8,
    #[serde(default)]
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn order_wire_field_names() {
        let order = Order {
            id: "o1".to_string(),
            product: "Latte".to_string(),
            datetime: "01/01/2026 09:30".to_string(),
            price: Decimal::new(350, 2),
            address: "123 Coffee Street".to_string(),
            option: ProductOption::default(),
            payment_method: Some("VISA".to_string()),
            coupon_percent: 5,
            status: OrderStatus::Ongoing,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["paymentMethod"], "VISA");
        assert_eq!(json["couponPercent"], 5);
        assert_eq!(json["status"], "ONGOING");
        assert_eq!(json["price"], 3.5);
    }

    #[test]
    fn order_status_defaults_to_ongoing() {
        let json = serde_json::json!({
            "id": "o1",
            "product": "Latte",
            "datetime": "01/01/2026 09:30",
            "price": 3.5,
            "address": "somewhere",
            "option": ProductOption::default(),
            "paymentMethod": null,
            "couponPercent": 0,
        });
        let order: Order = serde_json::from_value(json).unwrap();
        assert_eq!(order.status, OrderStatus::Ongoing);
    }
}
