//! In-memory preference store

use dashmap::DashMap;
use shared::remote::PreferenceStore;

#[derive(Default)]
pub struct MockPreferenceStore {
    values: DashMap<(String, String), bool>,
}

impl MockPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MockPreferenceStore {
    fn get_bool(&self, namespace: &str, key: &str) -> Option<bool> {
        self.values
            .get(&(namespace.to_string(), key.to_string()))
            .map(|v| *v)
    }

    fn set_bool(&self, namespace: &str, key: &str, value: bool) {
        self.values
            .insert((namespace.to_string(), key.to_string()), value);
    }
}
