//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub cuisine_type: Option<String>,
    /// Latitude/longitude pair
    pub coordinates: Option<[f64; 2]>,
    pub created_at: i64,
}

/// Create restaurant payload
///
/// Name + address pairs are unique; duplicates are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: String,
    pub cuisine_type: Option<String>,
    pub coordinates: Option<[f64; 2]>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub cuisine_type: Option<String>,
    pub coordinates: Option<[f64; 2]>,
}
