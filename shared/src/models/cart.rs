//! Cart Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::ProductOption;

/// One cart line
///
/// `price` is the precomputed total for the whole line (option and
/// quantity included) fixed at add/merge time; checkout never re-derives
/// it from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub product: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub option: ProductOption,
}
