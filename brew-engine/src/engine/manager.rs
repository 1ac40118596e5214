//! StateManager - the single owner of session state
//!
//! Construction injects the three external collaborators (document
//! store, identity provider, preference store); consumers share the
//! manager behind an `Arc` and never mutate fields directly.
//!
//! # Mutation flow
//!
//! ```text
//! mutating call
//!     ├─ 1. take the write gate
//!     ├─ 2. validate (boolean reject, no state change on failure)
//!     ├─ 3. apply all local changes to the observable cells
//!     ├─ 4. capture the full snapshot
//!     └─ 5. spawn the background push (fire-and-forget)
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use shared::docs::FIELD_REMEMBER_LOGIN;
use shared::remote::{DocumentStore, IdentityProvider, PREFS_NAMESPACE, PreferenceStore};

use crate::catalog::Catalog;
use crate::sync::{self, SyncError};

use super::state::EngineState;

pub struct StateManager {
    catalog: Catalog,
    state: EngineState,
    /// Serializes every read-modify-write sequence; single-writer
    /// semantics even when the manager is shared across threads
    write_gate: Mutex<()>,
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityProvider>,
    prefs: Arc<dyn PreferenceStore>,
}

impl std::fmt::Debug for StateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateManager")
            .field("points", &self.state.points.get())
            .field("stamps", &self.state.stamp_count.get())
            .field("cart_items", &self.state.cart.get().len())
            .finish()
    }
}

impl StateManager {
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
        prefs: Arc<dyn PreferenceStore>,
    ) -> Self {
        let state = EngineState::new(&catalog);
        Self {
            catalog,
            state,
            write_gate: Mutex::new(()),
            store,
            identity,
            prefs,
        }
    }

    /// Observable cells for UI-layer subscription
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Sum of all cart line prices
    pub fn cart_total(&self) -> Decimal {
        self.state.cart.get().iter().map(|item| item.price).sum()
    }

    /// Local remember-me flag
    pub fn is_remembered(&self) -> bool {
        self.prefs
            .get_bool(PREFS_NAMESPACE, FIELD_REMEMBER_LOGIN)
            .unwrap_or(false)
    }

    pub(super) fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub(super) fn identity(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }

    pub(super) fn prefs(&self) -> &Arc<dyn PreferenceStore> {
        &self.prefs
    }

    pub(super) fn gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock()
    }

    /// Capture the current snapshot and push it in the background.
    /// Callers hold the write gate so the snapshot is consistent. A
    /// failed push is only logged; the next mutation retries implicitly.
    pub(super) fn schedule_sync(&self) {
        let Some(identity) = self.identity.current_identity() else {
            tracing::debug!("no authenticated identity, skipping sync");
            return;
        };
        let snap = self.state.snapshot();
        let store = Arc::clone(&self.store);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = sync::push_snapshot(store.as_ref(), &identity.id, &snap).await {
                        tracing::warn!(uid = %identity.id, error = %e, "background sync failed");
                    }
                });
            }
            Err(_) => tracing::debug!("no async runtime, skipping background sync"),
        }
    }

    /// Awaited push of the current snapshot; the app calls this when it
    /// is backgrounded as a safety net on top of the per-mutation pushes
    pub async fn flush(&self) -> Result<(), SyncError> {
        let identity = self
            .identity
            .current_identity()
            .ok_or(SyncError::NotAuthenticated)?;
        let snap = {
            let _gate = self.gate();
            self.state.snapshot()
        };
        sync::push_snapshot(self.store.as_ref(), &identity.id, &snap).await
    }

    /// Pull the remote state for the signed-in identity into local state
    pub async fn load_from_remote(&self) -> Result<(), SyncError> {
        let identity = self
            .identity
            .current_identity()
            .ok_or(SyncError::NotAuthenticated)?;
        sync::load_from_remote(self.store.as_ref(), &identity, &self.state).await
    }
}
