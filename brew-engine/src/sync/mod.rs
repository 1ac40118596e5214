//! Sync controller
//!
//! Bidirectional reconciliation between the in-memory state and the
//! remote per-identity document store. Pushes always carry the current
//! full snapshot, never a delta, so in-flight pushes may overlap or
//! complete out of order without corrupting the remote copy. A failed
//! push is logged; the next mutation's push is the de facto retry.

mod pull;
mod push;

pub use pull::load_from_remote;
pub use push::push_snapshot;

use shared::StoreError;
use shared::models::{CartItem, Order, PointReward, UserProfile, VoucherOwned};
use thiserror::Error;

/// Sync failure
///
/// Local state is never rolled back because of one of these; remote is
/// eventually consistent.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no authenticated identity")]
    NotAuthenticated,

    #[error("root document: {0}")]
    Root(#[source] StoreError),

    #[error("cart document: {0}")]
    Cart(#[source] StoreError),

    #[error("order batch: {0}")]
    Orders(#[source] StoreError),
}

/// Consistent copy of everything the remote store persists
///
/// Captured inside the engine's write gate at mutation time; the push
/// task owns it outright so later mutations cannot tear it.
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub profile: UserProfile,
    pub stamps: u8,
    pub points: u64,
    pub points_history: Vec<PointReward>,
    pub owned_vouchers: Vec<VoucherOwned>,
    /// Voucher ids exhausted this session; pushed as remote deletes
    pub spent_vouchers: Vec<String>,
    pub cart: Vec<CartItem>,
    pub ongoing_orders: Vec<Order>,
    pub history_orders: Vec<Order>,
}
