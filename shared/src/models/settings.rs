//! Platform Settings Model

use serde::{Deserialize, Serialize};

/// Platform settings — a single global row, last writer wins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: i64,
    pub platform_name: String,
    pub contact_email: String,
    pub support_phone: String,
    pub updated_at: i64,
}

impl Settings {
    /// Default settings row, created on first read
    pub fn default_row(now: i64) -> Self {
        Self {
            id: 1,
            platform_name: "FoodRush".to_string(),
            contact_email: "contact@foodrush.com".to_string(),
            support_phone: "+7 (777) 123-4567".to_string(),
            updated_at: now,
        }
    }
}

/// Update settings payload (upsert, last-write-wins)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub platform_name: Option<String>,
    pub contact_email: Option<String>,
    pub support_phone: Option<String>,
}
