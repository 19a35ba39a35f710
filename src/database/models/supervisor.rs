use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A supervisor is assigned to exams at submission time and is the only
/// one allowed to grade them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Supervisor {
    pub id: i64,
    pub name: String,
}
