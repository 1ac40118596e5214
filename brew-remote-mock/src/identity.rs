//! In-memory identity provider

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use shared::remote::{AuthError, Identity, IdentityProvider};

struct Account {
    id: String,
    password: String,
    display_name: Option<String>,
}

/// Registered accounts keyed by email plus one cached signed-in
/// identity, mirroring a provider with device-local session persistence
#[derive(Default)]
pub struct MockIdentityProvider {
    accounts: DashMap<String, Account>,
    current: Mutex<Option<Identity>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register an account, returning its uid
    pub fn register_account(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.accounts.insert(
            email.to_string(),
            Account {
                id: id.clone(),
                password: password.to_string(),
                display_name: display_name.map(str::to_string),
            },
        );
        id
    }

    /// Pre-register and cache the identity, as if a previous app run had
    /// signed in
    pub fn seed_signed_in(&self, email: &str, password: &str, display_name: Option<&str>) -> String {
        let id = self.register_account(email, password, display_name);
        *self.current.lock() = Some(Identity {
            id: id.clone(),
            display_name: display_name.map(str::to_string),
            email: Some(email.to_string()),
        });
        id
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.current.lock().clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let Some(account) = self.accounts.get(email) else {
            return Err(AuthError::Rejected("unknown account".to_string()));
        };
        if account.password != password {
            return Err(AuthError::Rejected("wrong password".to_string()));
        }
        let identity = Identity {
            id: account.id.clone(),
            display_name: account.display_name.clone(),
            email: Some(email.to_string()),
        };
        *self.current.lock() = Some(identity.clone());
        Ok(identity)
    }

    async fn sign_up(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        if self.accounts.contains_key(email) {
            return Err(AuthError::Rejected("email already registered".to_string()));
        }
        let id = self.register_account(email, password, Some(display_name));
        let identity = Identity {
            id,
            display_name: Some(display_name.to_string()),
            email: Some(email.to_string()),
        };
        *self.current.lock() = Some(identity.clone());
        Ok(identity)
    }

    async fn set_display_name(&self, display_name: &str) -> Result<(), AuthError> {
        let mut current = self.current.lock();
        let Some(identity) = current.as_mut() else {
            return Err(AuthError::Rejected("not signed in".to_string()));
        };
        identity.display_name = Some(display_name.to_string());
        if let Some(email) = &identity.email {
            if let Some(mut account) = self.accounts.get_mut(email) {
                account.display_name = Some(display_name.to_string());
            }
        }
        Ok(())
    }

    fn sign_out(&self) {
        *self.current.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_requires_matching_password() {
        let provider = MockIdentityProvider::new();
        provider.register_account("a@b.c", "secret", Some("Ada"));

        assert!(provider.sign_in("a@b.c", "wrong").await.is_err());
        assert!(provider.current_identity().is_none());

        let identity = provider.sign_in("a@b.c", "secret").await.unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("Ada"));
        assert!(provider.current_identity().is_some());
    }

    #[tokio::test]
    async fn sign_up_rejects_duplicate_email() {
        let provider = MockIdentityProvider::new();
        provider.sign_up("a@b.c", "Ada", "pw").await.unwrap();
        assert!(provider.sign_up("a@b.c", "Eve", "pw2").await.is_err());
    }

    #[tokio::test]
    async fn display_name_update_sticks_across_sessions() {
        let provider = MockIdentityProvider::new();
        provider.sign_up("a@b.c", "Ada", "pw").await.unwrap();
        provider.set_display_name("Ada L").await.unwrap();
        provider.sign_out();

        let identity = provider.sign_in("a@b.c", "pw").await.unwrap();
        assert_eq!(identity.display_name.as_deref(), Some("Ada L"));
    }
}
