//! Loyalty Ledger Models

use serde::{Deserialize, Serialize};

/// Append-only points ledger entry
///
/// Positive `points` = earned, negative = spent. Entries are never
/// mutated or deleted once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointReward {
    pub id: String,
    /// Description, e.g. the product bought or "Redeemed Americano"
    pub product: String,
    pub datetime: String,
    pub points: i64,
}

/// A drink obtainable for a fixed point cost (static catalog entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redeemable {
    pub id: String,
    pub product: String,
    /// Display string, not parsed
    pub valid_until: String,
    pub points_required: u64,
}

impl Redeemable {
    pub fn new(id: &str, product: &str, valid_until: &str, points_required: u64) -> Self {
        Self {
            id: id.to_string(),
            product: product.to_string(),
            valid_until: valid_until.to_string(),
            points_required,
        }
    }
}
