//! Database access layer
//!
//! Free functions over `&PgPool`, one module per entity. Row structs stay
//! private to this layer; handlers only see the shared wire models.

pub mod customers;
pub mod drivers;
pub mod orders;
pub mod restaurants;
pub mod settings;
pub mod users;
