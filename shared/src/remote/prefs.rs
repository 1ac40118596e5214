//! Local preference store boundary

/// Fixed namespace for the app's preference keys
pub const PREFS_NAMESPACE: &str = "app_prefs";

/// Device-local key-value preference storage
///
/// Queried at session bootstrap before a cached identity is trusted.
/// Implementations are expected to be cheap and synchronous.
pub trait PreferenceStore: Send + Sync {
    fn get_bool(&self, namespace: &str, key: &str) -> Option<bool>;

    fn set_bool(&self, namespace: &str, key: &str, value: bool);
}
