//! The state engine
//!
//! [`StateManager`] is the single writer of all session state. Each
//! mutating operation runs synchronously under one write gate, then
//! schedules a background push of the full snapshot.

mod cart;
mod loyalty;
mod manager;
mod market;
mod observable;
mod orders;
mod session;
pub(crate) mod state;

pub use loyalty::STAMP_CAP;
pub use manager::StateManager;
pub use market::VOUCHER_COST;
pub use observable::Observable;
pub use state::EngineState;
