//! Data models
//!
//! Shared between the state engine and the remote document store: the
//! serialized form of these types is the wire schema, so field renames
//! here are load-bearing for remote interoperability.

pub mod cart;
pub mod loyalty;
pub mod order;
pub mod product;
pub mod profile;
pub mod voucher;

// Re-exports
pub use cart::*;
pub use loyalty::*;
pub use order::*;
pub use product::*;
pub use profile::*;
pub use voucher::*;
