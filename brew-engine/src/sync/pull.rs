//! Snapshot pull / session-start load

use serde_json::Value;
use shared::docs::{
    COLLECTION_CART, COLLECTION_ORDERS, COLLECTION_OWNED_VOUCHERS, COLLECTION_POINTS_HISTORY,
    CartDoc,
};
use shared::models::{Order, OrderStatus, PointReward, VoucherOwned};
use shared::remote::{DocumentStore, Identity};

use super::{SyncError, push_snapshot};
use crate::engine::STAMP_CAP;
use crate::engine::state::EngineState;

fn str_field(doc: &Value, name: &str) -> Option<String> {
    doc.get(name).and_then(Value::as_str).map(str::to_string)
}

fn uint_field(doc: &Value, name: &str) -> Option<u64> {
    doc.get(name).and_then(Value::as_u64)
}

/// Parse every document of a collection, skipping unreadable ones with a
/// log line
fn parse_docs<T: serde::de::DeserializeOwned>(collection: &str, docs: Vec<Value>) -> Vec<T> {
    docs.into_iter()
        .filter_map(|doc| match serde_json::from_value(doc) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!(collection, error = %e, "skipping unreadable document");
                None
            }
        })
        .collect()
}

/// Load the remote state for `identity` into `state`
///
/// First-ever load (no root document) bootstraps defaults locally and
/// pushes the initial snapshot to create the root. With an existing root
/// each sub-collection is pulled independently; a sub-collection failure
/// leaves that slice at its default and does not fail the load — only
/// the root read is a hard requirement.
pub async fn load_from_remote(
    store: &dyn DocumentStore,
    identity: &Identity,
    state: &EngineState,
) -> Result<(), SyncError> {
    let uid = identity.id.as_str();
    tracing::debug!(uid, "loading state from remote");

    let root = store.get_root(uid).await.map_err(SyncError::Root)?;

    let Some(root) = root else {
        // Brand-new account: local defaults are authoritative, push them
        // to create the root document
        state.reset_for_new_account(identity.display_name.as_deref(), identity.email.as_deref());
        tracing::debug!(uid, "no root document, bootstrapped defaults");
        let snap = state.snapshot();
        if let Err(e) = push_snapshot(store, uid, &snap).await {
            tracing::error!(uid, error = %e, "initial snapshot push failed");
        }
        return Ok(());
    };

    // Root fields: only overwrite what the document actually carries
    if let Some(v) = str_field(&root, "fullName") {
        state.full_name.set(v);
    }
    if let Some(v) = str_field(&root, "phoneNumber") {
        state.phone_number.set(v);
    }
    if let Some(v) = str_field(&root, "deliveryLocation") {
        state.delivery_location.set(v);
    }
    if let Some(v) = str_field(&root, "photoUrl").filter(|v| !v.is_empty()) {
        state.photo_url.set(Some(v));
    }
    // A remote document may carry an over-full card (written by an older
    // client); clamp so the local card stays within its cap and the
    // full-card reset remains reachable
    if let Some(v) = uint_field(&root, "stamps") {
        state.stamp_count.set(v.min(u64::from(STAMP_CAP)) as u8);
    }
    if let Some(v) = uint_field(&root, "points") {
        state.points.set(v);
    }

    match store.get_collection(uid, COLLECTION_POINTS_HISTORY).await {
        Ok(docs) => {
            let history: Vec<PointReward> = parse_docs(COLLECTION_POINTS_HISTORY, docs);
            tracing::debug!(uid, entries = history.len(), "points history loaded");
            state.points_history.set(history);
        }
        Err(e) => tracing::warn!(uid, error = %e, "points history load failed"),
    }

    match store.get_collection(uid, COLLECTION_OWNED_VOUCHERS).await {
        Ok(docs) => {
            let vouchers: Vec<VoucherOwned> = parse_docs(COLLECTION_OWNED_VOUCHERS, docs)
                .into_iter()
                .filter(|v: &VoucherOwned| v.quantity > 0)
                .collect();
            tracing::debug!(uid, vouchers = vouchers.len(), "owned vouchers loaded");
            state.owned_vouchers.set(vouchers);
        }
        Err(e) => tracing::warn!(uid, error = %e, "owned vouchers load failed"),
    }

    match store.get_collection(uid, COLLECTION_CART).await {
        Ok(docs) => {
            if let Some(cart_doc) = parse_docs::<CartDoc>(COLLECTION_CART, docs).into_iter().next()
            {
                tracing::debug!(uid, items = cart_doc.items.len(), "cart loaded");
                state.cart.set(cart_doc.items);
            }
        }
        Err(e) => tracing::warn!(uid, error = %e, "cart load failed"),
    }

    match store.get_collection(uid, COLLECTION_ORDERS).await {
        Ok(docs) => {
            let orders: Vec<Order> = parse_docs(COLLECTION_ORDERS, docs);
            let (ongoing, completed): (Vec<Order>, Vec<Order>) = orders
                .into_iter()
                .partition(|o| o.status == OrderStatus::Ongoing);
            tracing::debug!(
                uid,
                ongoing = ongoing.len(),
                completed = completed.len(),
                "orders loaded"
            );
            state.ongoing_orders.set(ongoing);
            state.history_orders.set(completed);
        }
        Err(e) => tracing::warn!(uid, error = %e, "orders load failed"),
    }

    Ok(())
}
