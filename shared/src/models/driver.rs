//! Driver Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Driver availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    #[default]
    Available,
    Busy,
    Offline,
}

impl DriverStatus {
    /// Wire/database string for this status
    pub const fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Available => "available",
            DriverStatus::Busy => "busy",
            DriverStatus::Offline => "offline",
        }
    }

    /// Parse a wire/database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(DriverStatus::Available),
            "busy" => Some(DriverStatus::Busy),
            "offline" => Some(DriverStatus::Offline),
            _ => None,
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Driver entity
///
/// Offlining or deleting a driver does not touch orders already assigned
/// to them; orders keep their driver snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub status: DriverStatus,
    pub created_at: i64,
}

/// Create driver payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverCreate {
    pub name: String,
    #[serde(default)]
    pub status: DriverStatus,
}

/// Update driver payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DriverUpdate {
    pub name: Option<String>,
    pub status: Option<DriverStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            DriverStatus::Available,
            DriverStatus::Busy,
            DriverStatus::Offline,
        ] {
            assert_eq!(DriverStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(DriverStatus::parse("sleeping"), None);
    }

    #[test]
    fn test_create_defaults_to_available() {
        let create: DriverCreate = serde_json::from_str(r#"{"name": "Alex"}"#).unwrap();
        assert_eq!(create.status, DriverStatus::Available);
    }
}
