//! Static drink catalog
//!
//! Loaded once at engine construction and never mutated. Carries the
//! product list with display prices, the redeemable-drink catalog and
//! the purchasable voucher templates.

use rust_decimal::Decimal;
use shared::models::{Coupon, Product, Redeemable};

/// Display base price for products without a catalog entry
fn default_display_price() -> Decimal {
    Decimal::new(350, 2)
}

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    redeemables: Vec<Redeemable>,
    voucher_templates: Vec<Coupon>,
    coupon_seed: Vec<Coupon>,
}

impl Catalog {
    /// The standard menu
    pub fn standard() -> Self {
        let p = |name, category, cents| Product::new(name, category, Decimal::new(cents, 2));
        let products = vec![
            // Coffee
            p("Americano", "Coffee", 250),
            p("Cappuccino", "Coffee", 350),
            p("Latte", "Coffee", 350),
            p("Flat White", "Coffee", 375),
            p("Macchiato", "Coffee", 300),
            p("Mocha", "Coffee", 400),
            p("Cortado", "Coffee", 325),
            p("Doppio", "Coffee", 275),
            p("Affogato", "Coffee", 450),
            p("Irish Coffee", "Coffee", 550),
            p("Nitro Cold Brew", "Coffee", 425),
            p("Bulletproof Coffee", "Coffee", 475),
            p("Butter Coffee", "Coffee", 450),
            p("Chemex", "Coffee", 380),
            p("French Press", "Coffee", 360),
            p("Moka Pot", "Coffee", 340),
            // Milk drinks
            p("Chocolate Milk", "Milk", 300),
            p("Oat Milk", "Milk", 280),
            p("Almond Milk", "Milk", 280),
            p("Soy Milk", "Milk", 280),
            p("Coconut Milk", "Milk", 300),
            p("Malted Milkshake", "Milk", 450),
            p("Banana Milkshake", "Milk", 425),
            p("Steamer", "Milk", 250),
            p("Hot Milk", "Milk", 200),
            p("Maple Milk", "Milk", 320),
            // Smoothies
            p("Mango Smoothie", "Smoothie", 500),
            p("Strawberry Smoothie", "Smoothie", 475),
            p("Berry Blast Smoothie", "Smoothie", 525),
            p("Tropical Smoothie", "Smoothie", 550),
            p("Protein Smoothie", "Smoothie", 600),
            p("Mixed Berry Smoothie", "Smoothie", 500),
            p("Blueberry Smoothie", "Smoothie", 475),
            p("Raspberry Smoothie", "Smoothie", 475),
            p("Peanut Butter Banana Smoothie", "Smoothie", 550),
            p("Pomegranate Smoothie", "Smoothie", 525),
            p("Coconut Smoothie", "Smoothie", 500),
            p("Oat Smoothie", "Smoothie", 450),
            // Alcoholic
            p("Beer Lager", "Alcoholic", 500),
            p("Stout", "Alcoholic", 550),
            p("Old Fashioned", "Alcoholic", 800),
            p("Manhattan", "Alcoholic", 850),
            p("Rum Punch", "Alcoholic", 700),
            p("Tequila Sunrise", "Alcoholic", 750),
            p("Bellini", "Alcoholic", 700),
        ];

        // Points required = 1000 x base price
        let redeemables = vec![
            Redeemable::new("r1", "Americano", "31 Dec 2025", 2500),
            Redeemable::new("r2", "Latte", "31 Dec 2025", 3500),
        ];

        let voucher_templates = vec![
            Coupon::new("v1", "5% off", 5),
            Coupon::new("v2", "10% off", 10),
        ];

        let coupon_seed = vec![
            Coupon::new("c1", "5% off", 5),
            Coupon::new("c2", "10% off", 10),
        ];

        Self {
            products,
            redeemables,
            voucher_templates,
            coupon_seed,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    /// Distinct categories, sorted
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.products.iter().map(|p| p.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Catalog display price; unknown names fall back to 3.50
    pub fn display_price(&self, product_name: &str) -> Decimal {
        self.products
            .iter()
            .find(|p| p.name == product_name)
            .map(|p| p.base_price)
            .unwrap_or_else(default_display_price)
    }

    /// Case-insensitive membership check, returning the canonical name
    pub fn canonical_name(&self, name: &str) -> Option<&str> {
        let lowered = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.to_lowercase() == lowered)
            .map(|p| p.name.as_str())
    }

    pub fn redeemables(&self) -> &[Redeemable] {
        &self.redeemables
    }

    pub fn voucher_templates(&self) -> &[Coupon] {
        &self.voucher_templates
    }

    pub fn coupon_seed(&self) -> &[Coupon] {
        &self.coupon_seed
    }
}
