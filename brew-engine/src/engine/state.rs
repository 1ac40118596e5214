//! Engine state container
//!
//! Every externally-observed piece of state is an [`Observable`] cell.
//! Only the engine's own operations write to these; consumers hold a
//! `StateManager` handle and subscribe.

use std::collections::BTreeSet;

use parking_lot::Mutex;
use shared::models::{
    CartItem, Coupon, Order, PointReward, Redeemable, UserProfile, VoucherOwned,
};

use crate::catalog::Catalog;
use crate::sync::StateSnapshot;

use super::observable::Observable;

/// Default contact fields for an account with no stored profile yet
pub const DEFAULT_PHONE: &str = "+1 (555) 123-4567";
pub const DEFAULT_ADDRESS: &str = "123 Coffee Street, Bean City";

#[derive(Debug)]
pub struct EngineState {
    pub full_name: Observable<String>,
    pub email: Observable<String>,
    pub phone_number: Observable<String>,
    pub delivery_location: Observable<String>,
    pub photo_url: Observable<Option<String>>,

    pub stamp_count: Observable<u8>,
    pub points: Observable<u64>,
    pub points_history: Observable<Vec<PointReward>>,

    pub redeemables: Observable<Vec<Redeemable>>,
    pub available_vouchers: Observable<Vec<Coupon>>,
    pub owned_vouchers: Observable<Vec<VoucherOwned>>,
    pub coupons: Observable<Vec<Coupon>>,

    pub cart: Observable<Vec<CartItem>>,
    pub ongoing_orders: Observable<Vec<Order>>,
    pub history_orders: Observable<Vec<Order>>,

    pub is_logged_in: Observable<bool>,

    /// Voucher ids whose owned quantity hit zero; the sync push issues
    /// remote deletes for these so zero-quantity entries never persist
    pub spent_vouchers: Mutex<BTreeSet<String>>,
}

impl EngineState {
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            full_name: Observable::default(),
            email: Observable::default(),
            phone_number: Observable::new(DEFAULT_PHONE.to_string()),
            delivery_location: Observable::new(DEFAULT_ADDRESS.to_string()),
            photo_url: Observable::default(),
            stamp_count: Observable::new(0),
            points: Observable::new(0),
            points_history: Observable::default(),
            redeemables: Observable::new(catalog.redeemables().to_vec()),
            available_vouchers: Observable::new(catalog.voucher_templates().to_vec()),
            owned_vouchers: Observable::default(),
            coupons: Observable::new(catalog.coupon_seed().to_vec()),
            cart: Observable::default(),
            ongoing_orders: Observable::default(),
            history_orders: Observable::default(),
            is_logged_in: Observable::new(false),
            spent_vouchers: Mutex::new(BTreeSet::new()),
        }
    }

    /// Reset to the defaults of a brand-new account, keeping whatever
    /// display fields the identity provider knows
    pub fn reset_for_new_account(&self, display_name: Option<&str>, email: Option<&str>) {
        self.full_name.set(display_name.unwrap_or("").to_string());
        self.email.set(email.unwrap_or("").to_string());
        self.phone_number.set(DEFAULT_PHONE.to_string());
        self.delivery_location.set(DEFAULT_ADDRESS.to_string());
        self.photo_url.set(None);
        self.stamp_count.set(0);
        self.points.set(0);
        self.points_history.set(Vec::new());
        self.owned_vouchers.set(Vec::new());
        self.cart.set(Vec::new());
        self.ongoing_orders.set(Vec::new());
        self.history_orders.set(Vec::new());
        self.spent_vouchers.lock().clear();
    }

    /// Clear session-local state on logout; points and history stay
    /// local-only until the next login pulls them fresh
    pub fn clear_session(&self) {
        self.cart.set(Vec::new());
        self.ongoing_orders.set(Vec::new());
        self.history_orders.set(Vec::new());
        self.stamp_count.set(0);
        self.spent_vouchers.lock().clear();
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            full_name: self.full_name.get(),
            email: self.email.get(),
            phone_number: self.phone_number.get(),
            delivery_location: self.delivery_location.get(),
            photo_url: self.photo_url.get(),
        }
    }

    /// Full snapshot for a remote push. Callers must hold the write gate
    /// so the snapshot is consistent across cells.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            profile: self.profile(),
            stamps: self.stamp_count.get(),
            points: self.points.get(),
            points_history: self.points_history.get(),
            owned_vouchers: self.owned_vouchers.get(),
            spent_vouchers: self.spent_vouchers.lock().iter().cloned().collect(),
            cart: self.cart.get(),
            ongoing_orders: self.ongoing_orders.get(),
            history_orders: self.history_orders.get(),
        }
    }
}
