//! In-memory doubles of the remote collaborators
//!
//! Drop-in implementations of the `shared::remote` traits for tests and
//! local development: a document store with merge semantics and
//! per-collection failure injection, an identity provider with
//! registered accounts, and a preference store.

mod identity;
mod prefs;
mod store;

pub use identity::MockIdentityProvider;
pub use prefs::MockPreferenceStore;
pub use store::MockDocumentStore;
