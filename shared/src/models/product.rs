//! Product Catalog Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Espresso shot selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShotType {
    #[default]
    Single,
    Double,
}

/// Serving temperature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemperatureType {
    #[default]
    Hot,
    Iced,
}

/// Cup size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeType {
    Small,
    #[default]
    Medium,
    Large,
}

/// Ice level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IceType {
    Less,
    Half,
    #[default]
    Full,
}

/// Catalog entry (static, loaded at startup, never mutated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub base_price: Decimal,
}

impl Product {
    pub fn new(name: &str, category: &str, base_price: Decimal) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            base_price,
        }
    }
}

/// Selected options for one cart/order line
///
/// The default option set (qty 1, single shot, hot, medium, full ice) is
/// what redemption orders are created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductOption {
    pub quantity: u32,
    pub shot: ShotType,
    pub temperature: TemperatureType,
    pub size: SizeType,
    pub ice: IceType,
}

impl Default for ProductOption {
    fn default() -> Self {
        Self {
            quantity: 1,
            shot: ShotType::default(),
            temperature: TemperatureType::default(),
            size: SizeType::default(),
            ice: IceType::default(),
        }
    }
}

impl ProductOption {
    /// Two option sets share a shape when every field except `quantity`
    /// matches. Cart lines with the same product and shape are merged,
    /// never duplicated.
    pub fn same_shape(&self, other: &ProductOption) -> bool {
        self.shot == other.shot
            && self.temperature == other.temperature
            && self.size == other.size
            && self.ice == other.ice
    }

    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self { quantity, ..*self }
    }
}
