//! Snapshot push

use futures::future::join_all;
use serde_json::Value;
use shared::StoreError;
use shared::docs::{
    COLLECTION_CART, COLLECTION_ORDERS, COLLECTION_OWNED_VOUCHERS, COLLECTION_POINTS_HISTORY,
    CART_DOC_ID, CartDoc, ProfileDoc,
};
use shared::remote::DocumentStore;
use shared::util::now_millis;

use super::{StateSnapshot, SyncError};

fn profile_doc(uid: &str, snap: &StateSnapshot) -> ProfileDoc {
    ProfileDoc {
        id: uid.to_string(),
        email: snap.profile.email.clone(),
        full_name: snap.profile.full_name.clone(),
        photo_url: snap.profile.photo_url.clone().unwrap_or_default(),
        phone_number: snap.profile.phone_number.clone(),
        delivery_location: snap.profile.delivery_location.clone(),
        stamps: snap.stamps,
        points: snap.points,
        remember_login: None,
        updated_at: now_millis(),
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(StoreError::from)
}

/// Push one full snapshot to `users/{uid}`
///
/// Order of operations: the root profile merge must succeed first; the
/// points-history, voucher and cart writes then run concurrently; the
/// order batch goes last and must complete for overall success. History
/// and voucher failures are logged but do not fail the push.
pub async fn push_snapshot(
    store: &dyn DocumentStore,
    uid: &str,
    snap: &StateSnapshot,
) -> Result<(), SyncError> {
    tracing::debug!(
        uid,
        stamps = snap.stamps,
        points = snap.points,
        cart_items = snap.cart.len(),
        orders = snap.ongoing_orders.len() + snap.history_orders.len(),
        "pushing snapshot"
    );

    let root = encode(&profile_doc(uid, snap)).map_err(SyncError::Root)?;
    store
        .set_root_merge(uid, root)
        .await
        .map_err(SyncError::Root)?;

    let history = async {
        let writes = snap.points_history.iter().map(|reward| async move {
            let doc = encode(reward)?;
            store
                .set_in_collection(uid, COLLECTION_POINTS_HISTORY, &reward.id, doc, true)
                .await
        });
        for result in join_all(writes).await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "points-history write failed");
            }
        }
    };

    let vouchers = async {
        let writes = snap.owned_vouchers.iter().map(|owned| async move {
            let doc = encode(owned)?;
            store
                .set_in_collection(uid, COLLECTION_OWNED_VOUCHERS, &owned.voucher_id, doc, true)
                .await
        });
        for result in join_all(writes).await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "owned-voucher write failed");
            }
        }
        // Exhausted vouchers must not persist remotely with quantity 0
        let deletes = snap.spent_vouchers.iter().map(|voucher_id| async move {
            store
                .delete_from_collection(uid, COLLECTION_OWNED_VOUCHERS, voucher_id)
                .await
        });
        for result in join_all(deletes).await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "owned-voucher delete failed");
            }
        }
    };

    let cart = async {
        let doc = encode(&CartDoc::new(snap.cart.clone(), now_millis())).map_err(SyncError::Cart)?;
        store
            .set_in_collection(uid, COLLECTION_CART, CART_DOC_ID, doc, true)
            .await
            .map_err(SyncError::Cart)
    };

    let ((), (), cart_result) = tokio::join!(history, vouchers, cart);
    cart_result?;

    let order_writes = snap
        .ongoing_orders
        .iter()
        .chain(snap.history_orders.iter())
        .map(|order| async move {
            let doc = encode(order).map_err(SyncError::Orders)?;
            store
                .set_in_collection(uid, COLLECTION_ORDERS, &order.id, doc, true)
                .await
                .map_err(SyncError::Orders)
        });
    for result in join_all(order_writes).await {
        result?;
    }

    tracing::debug!(uid, "snapshot push complete");
    Ok(())
}
