//! Identity provider boundary

use async_trait::async_trait;
use thiserror::Error;

/// Authentication failure
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication rejected: {0}")]
    Rejected(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// The authenticated identity; `id` is the stable key for all remote
/// documents, everything else is display data
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// Remote authentication service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The cached identity from a previous session, if any
    fn current_identity(&self) -> Option<Identity>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_up(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<Identity, AuthError>;

    /// Update the display name of the signed-in identity
    async fn set_display_name(&self, display_name: &str) -> Result<(), AuthError>;

    fn sign_out(&self);
}
