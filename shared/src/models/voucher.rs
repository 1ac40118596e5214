//! Voucher Models

use serde::{Deserialize, Serialize};

/// Purchasable voucher template (percentage discount)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub label: String,
    pub percent_off: u8,
}

impl Coupon {
    pub fn new(id: &str, label: &str, percent_off: u8) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            percent_off,
        }
    }
}

/// Stock of one voucher type owned by the user
///
/// Entries with quantity 0 are pruned eagerly and must never persist,
/// locally or remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherOwned {
    pub voucher_id: String,
    pub label: String,
    pub percent_off: u8,
    pub quantity: u32,
}
