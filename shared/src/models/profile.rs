//! User Profile Model

use serde::{Deserialize, Serialize};

/// Scalar profile fields, sourced from the identity provider and the
/// remote root document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub delivery_location: String,
    pub photo_url: Option<String>,
}

/// Partial profile update; only the provided fields are written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub delivery_location: Option<String>,
}
