use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::database::models::enrollment::dominant_status;
use crate::database::models::EnrollmentStatus;
use crate::error::ApiError;

/// GET /evaluateStudent/:student_id - most frequent enrollment status
///
/// Groups the student's enrollments by status and reports the status with
/// the highest count. Ties resolve to the lowest status variant.
pub async fn get(
    State(pool): State<SqlitePool>,
    Path(student_id): Path<i64>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let counts = sqlx::query_as::<_, (EnrollmentStatus, i64)>(
        "SELECT status, COUNT(id) FROM enrollments WHERE student_id = ? GROUP BY status",
    )
    .bind(student_id)
    .fetch_all(&pool)
    .await?;

    let (status, count) = dominant_status(&counts)
        .ok_or_else(|| ApiError::bad_request("Student has no enrollments."))?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "student_id": student_id,
                "status": status,
                "count": count
            }
        })),
    ))
}
