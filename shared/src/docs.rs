//! Remote document-store schema
//!
//! Per-user layout: one root profile document at `users/{uid}` plus the
//! sub-collections `pointsHistory`, `ownedVouchers`, `cart` (single
//! document `cart_doc`) and `orders` (one document per order id).
//! `PointReward`, `VoucherOwned` and `Order` serialize directly as their
//! collection documents; the two composite documents live here.

use serde::{Deserialize, Serialize};

use crate::models::CartItem;

/// Collection holding the points ledger, one document per entry
pub const COLLECTION_POINTS_HISTORY: &str = "pointsHistory";
/// Collection holding owned vouchers, one document per voucher type
pub const COLLECTION_OWNED_VOUCHERS: &str = "ownedVouchers";
/// Collection holding the single cart document
pub const COLLECTION_CART: &str = "cart";
/// Collection holding orders, one document per order
pub const COLLECTION_ORDERS: &str = "orders";
/// Fixed id of the cart document inside its collection
pub const CART_DOC_ID: &str = "cart_doc";
/// Root-document field carrying the remember-me decision
pub const FIELD_REMEMBER_LOGIN: &str = "remember_login";

/// Root profile document, written with merge semantics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDoc {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    /// Empty string when no photo is set (the store has no null type for
    /// merged fields)
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub delivery_location: String,
    #[serde(default)]
    pub stamps: u8,
    #[serde(default)]
    pub points: u64,
    #[serde(rename = "remember_login", default, skip_serializing_if = "Option::is_none")]
    pub remember_login: Option<bool>,
    #[serde(default)]
    pub updated_at: i64,
}

/// The single cart document: a full replacement of the item list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDoc {
    pub id: String,
    pub items: Vec<CartItem>,
    pub updated_at: i64,
}

impl CartDoc {
    pub fn new(items: Vec<CartItem>, updated_at: i64) -> Self {
        Self {
            id: CART_DOC_ID.to_string(),
            items,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_doc_tolerates_missing_fields() {
        let doc: ProfileDoc = serde_json::from_value(serde_json::json!({
            "fullName": "Ada",
            "points": 120,
        }))
        .unwrap();
        assert_eq!(doc.full_name, "Ada");
        assert_eq!(doc.points, 120);
        assert_eq!(doc.stamps, 0);
        assert_eq!(doc.remember_login, None);
    }

    #[test]
    fn remember_login_is_not_written_when_unset() {
        let doc = ProfileDoc::default();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("remember_login").is_none());
    }
}
