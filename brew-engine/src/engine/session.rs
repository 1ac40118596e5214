//! Session lifecycle: bootstrap, login, registration, logout and
//! profile updates

use serde_json::json;
use shared::docs::FIELD_REMEMBER_LOGIN;
use shared::models::UserProfileUpdate;
use shared::remote::{AuthError, PREFS_NAMESPACE};
use shared::util::now_millis;

use crate::sync::SyncError;

use super::manager::StateManager;

impl StateManager {
    /// Session bootstrap at app start
    ///
    /// Restores the previous session when a cached identity exists AND
    /// the remember-me flag is set. The remote root document is the
    /// authority on the flag; the local preference is the fallback when
    /// the store cannot be reached. Anything else signs the cached
    /// identity out.
    pub async fn init(&self) {
        let Some(identity) = self.identity().current_identity() else {
            tracing::debug!("no cached identity at startup");
            self.state().is_logged_in.set(false);
            return;
        };

        let remembered = match self.store().get_root(&identity.id).await {
            Ok(Some(root)) => root
                .get(FIELD_REMEMBER_LOGIN)
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(uid = %identity.id, error = %e, "remember-me check unreachable, using local flag");
                self.is_remembered()
            }
        };

        if !remembered {
            tracing::debug!(uid = %identity.id, "session not remembered, signing out");
            self.prefs()
                .set_bool(PREFS_NAMESPACE, FIELD_REMEMBER_LOGIN, false);
            self.identity().sign_out();
            self.state().is_logged_in.set(false);
            return;
        }

        self.state()
            .email
            .set(identity.email.clone().unwrap_or_default());
        self.state().full_name.set(
            identity
                .display_name
                .clone()
                .unwrap_or_else(|| "User".to_string()),
        );
        self.state().is_logged_in.set(true);
        self.prefs()
            .set_bool(PREFS_NAMESPACE, FIELD_REMEMBER_LOGIN, true);
        tracing::info!(uid = %identity.id, "session restored");

        if let Err(e) = self.load_from_remote().await {
            tracing::warn!(uid = %identity.id, error = %e, "remote load failed, keeping defaults");
        }
    }

    /// Sign in and pull the account state
    ///
    /// Auth failure is the only hard error. The remember-me write and the
    /// remote load are best-effort: the session is live on local state
    /// either way and the next mutation pushes a fresh snapshot.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> Result<(), AuthError> {
        let identity = self.identity().sign_in(email, password).await?;
        tracing::info!(uid = %identity.id, "signed in");

        self.state()
            .email
            .set(identity.email.clone().unwrap_or_else(|| email.to_string()));
        self.state().full_name.set(
            identity
                .display_name
                .clone()
                .unwrap_or_else(|| "User".to_string()),
        );
        self.state().is_logged_in.set(true);

        let root_patch = json!({
            "id": identity.id,
            "email": self.state().email.get(),
            "fullName": self.state().full_name.get(),
            FIELD_REMEMBER_LOGIN: remember,
            "updatedAt": now_millis(),
        });
        if let Err(e) = self.store().set_root_merge(&identity.id, root_patch).await {
            tracing::warn!(uid = %identity.id, error = %e, "remember-me write failed");
        }
        self.prefs()
            .set_bool(PREFS_NAMESPACE, FIELD_REMEMBER_LOGIN, remember);

        if let Err(e) = self.load_from_remote().await {
            tracing::warn!(uid = %identity.id, error = %e, "remote load failed after login");
        }
        Ok(())
    }

    /// Create an account, stamp its display name, and leave the caller
    /// signed out; the login screen takes over from there
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let identity = self.identity().sign_up(email, username, password).await?;
        self.identity().set_display_name(username).await?;
        tracing::info!(uid = %identity.id, "account registered");
        self.identity().sign_out();
        Ok(())
    }

    /// Sign out and drop session-local state
    ///
    /// The remote remember-me flag is cleared best-effort; sign-out
    /// proceeds regardless so a dead network cannot trap the user in a
    /// session.
    pub async fn logout(&self) {
        if let Some(identity) = self.identity().current_identity() {
            let patch = json!({ FIELD_REMEMBER_LOGIN: false });
            if let Err(e) = self.store().set_root_merge(&identity.id, patch).await {
                tracing::warn!(uid = %identity.id, error = %e, "remember-me clear failed");
            }
            tracing::info!(uid = %identity.id, "signed out");
        }
        self.prefs()
            .set_bool(PREFS_NAMESPACE, FIELD_REMEMBER_LOGIN, false);
        self.identity().sign_out();
        self.state().clear_session();
        self.state().is_logged_in.set(false);
    }

    /// Apply a partial profile update locally and merge the provided
    /// fields into the remote root document
    pub async fn update_user_info(&self, update: UserProfileUpdate) -> Result<(), SyncError> {
        let identity = self
            .identity()
            .current_identity()
            .ok_or(SyncError::NotAuthenticated)?;

        {
            let _gate = self.gate();
            if let Some(v) = &update.full_name {
                self.state().full_name.set(v.clone());
            }
            if let Some(v) = &update.phone_number {
                self.state().phone_number.set(v.clone());
            }
            if let Some(v) = &update.email {
                self.state().email.set(v.clone());
            }
            if let Some(v) = &update.delivery_location {
                self.state().delivery_location.set(v.clone());
            }
        }

        let mut patch = serde_json::Map::new();
        if let Some(v) = update.full_name {
            patch.insert("fullName".to_string(), json!(v));
        }
        if let Some(v) = update.phone_number {
            patch.insert("phoneNumber".to_string(), json!(v));
        }
        if let Some(v) = update.email {
            patch.insert("email".to_string(), json!(v));
        }
        if let Some(v) = update.delivery_location {
            patch.insert("deliveryLocation".to_string(), json!(v));
        }
        patch.insert("updatedAt".to_string(), json!(now_millis()));

        self.store()
            .set_root_merge(&identity.id, serde_json::Value::Object(patch))
            .await
            .map_err(SyncError::Root)?;
        tracing::debug!(uid = %identity.id, "profile updated");
        Ok(())
    }
}
