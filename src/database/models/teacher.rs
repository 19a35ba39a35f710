use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A teacher owns students and enrolls them in classes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
}
