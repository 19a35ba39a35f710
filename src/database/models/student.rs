use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A student belongs to exactly one teacher.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
}
