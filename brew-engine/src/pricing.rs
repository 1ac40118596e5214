//! Line pricing
//!
//! Pure price computation for one cart line. All arithmetic is exact
//! `Decimal`; nothing here rounds — rounding to 2 decimals happens only
//! at checkout, after the discount is applied.
//!
//! The base-price table below is the pricing table, deliberately
//! separate from the catalog's display prices.

use rust_decimal::Decimal;
use shared::models::{ProductOption, ShotType, SizeType};

/// Base price for products absent from the pricing table
fn fallback_base() -> Decimal {
    Decimal::new(300, 2)
}

fn base_price(product: &str) -> Decimal {
    match product.to_lowercase().as_str() {
        "americano" => Decimal::new(250, 2),
        "cappuccino" => Decimal::new(300, 2),
        "latte" => Decimal::new(350, 2),
        "flat white" => Decimal::new(325, 2),
        _ => fallback_base(),
    }
}

fn size_multiplier(size: SizeType) -> Decimal {
    match size {
        SizeType::Small => Decimal::new(8, 1),
        SizeType::Medium => Decimal::ONE,
        SizeType::Large => Decimal::new(13, 1),
    }
}

fn shot_extra(shot: ShotType) -> Decimal {
    match shot {
        ShotType::Single => Decimal::ZERO,
        ShotType::Double => Decimal::new(50, 2),
    }
}

/// Total price for one line: `(base x size + shot) x quantity`
///
/// Deterministic, no side effects, no failure modes; linear in quantity.
pub fn quote(product: &str, option: &ProductOption) -> Decimal {
    (base_price(product) * size_multiplier(option.size) + shot_extra(option.shot))
        * Decimal::from(option.quantity)
}
