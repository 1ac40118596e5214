//! Brew engine
//!
//! The in-memory transactional state engine behind the coffee-ordering
//! app: catalog and pricing, cart, loyalty points and stamps, the
//! redemption/voucher economy, checkout, order partitions, session
//! lifecycle, and two-way synchronization with a remote per-user
//! document store.
//!
//! All state lives in one [`StateManager`] handed around as an
//! `Arc`; mutations are synchronous and atomic from the caller's
//! perspective, and every mutation schedules a fire-and-forget push of
//! the full state snapshot to the remote store.

pub mod catalog;
pub mod engine;
pub mod logger;
pub mod pricing;
pub mod recommend;
pub mod sync;

pub use catalog::Catalog;
pub use engine::{Observable, StateManager};
pub use sync::{StateSnapshot, SyncError};
