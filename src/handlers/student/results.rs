use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub top: i64,
}

impl ResultsQuery {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.top < 0 {
            let mut field_errors = HashMap::new();
            field_errors.insert("top".to_string(), "must be non-negative".to_string());
            return Err(ApiError::validation_error("Invalid result count", Some(field_errors)));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, FromRow)]
pub struct TopStudent {
    pub id: i64,
    pub name: String,
    pub average_result: f64,
}

/// GET /results?top=N - leaderboard of students by average exam result
///
/// Students whose exams carry no result yet have no average and are left
/// out. Equal averages are ordered by ascending student id so the cutoff
/// is deterministic.
pub async fn get(
    State(pool): State<SqlitePool>,
    Query(query): Query<ResultsQuery>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    query.validate()?;

    let rows = sqlx::query_as::<_, TopStudent>(
        "SELECT s.id AS id, s.name AS name, AVG(e.result) AS average_result
         FROM students s
         JOIN enrollments en ON en.student_id = s.id
         JOIN exams e ON e.enrollment_id = en.id
         WHERE e.result IS NOT NULL
         GROUP BY s.id, s.name
         ORDER BY average_result DESC, s.id ASC
         LIMIT ?",
    )
    .bind(query.top)
    .fetch_all(&pool)
    .await?;

    Ok((StatusCode::OK, Json(json!({ "success": true, "data": rows }))))
}
