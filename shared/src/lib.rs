//! Shared types for the FoodRush platform
//!
//! Common types used by both the server and the console client:
//! error codes and response structures, wire models, the order status
//! state machine, and pure analytics over fetched collections.

pub mod analytics;
pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use order::OrderStatus;
