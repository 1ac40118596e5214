//! External collaborator boundaries
//!
//! The engine treats the document store, the identity provider and the
//! device preference store as opaque trait objects. Real transports live
//! outside this workspace; `brew-remote-mock` provides in-memory
//! implementations for tests and demos.

pub mod identity;
pub mod prefs;
pub mod store;

pub use identity::{AuthError, Identity, IdentityProvider};
pub use prefs::{PREFS_NAMESPACE, PreferenceStore};
pub use store::DocumentStore;
