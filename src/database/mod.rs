pub mod manager;
pub mod models;

pub use manager::{connect, health_check, init_schema, DatabaseError};
