use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::models::{Enrollment, EnrollmentStatus, Exam};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct EvaluateExamRequest {
    pub supervisor_id: i64,
    pub enrollment_id: i64,
    pub result: f64,
}

impl EvaluateExamRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(0.0..=5.0).contains(&self.result) {
            let mut field_errors = HashMap::new();
            field_errors.insert("result".to_string(), "must be between 0 and 5".to_string());
            return Err(ApiError::validation_error("Invalid exam result", Some(field_errors)));
        }
        Ok(())
    }
}

/// POST /evaluateExam - grade an exam and move its enrollment status
///
/// The exam lookup is scoped to (enrollment, supervisor): only the
/// supervisor assigned at submission time may grade. Result and status are
/// written in the same transaction.
pub async fn post(
    State(pool): State<SqlitePool>,
    Json(request): Json<EvaluateExamRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    request.validate()?;

    let mut tx = pool.begin().await?;

    let enrollment = sqlx::query_as::<_, Enrollment>(
        "SELECT id, student_id, class_id, status FROM enrollments WHERE id = ?",
    )
    .bind(request.enrollment_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::bad_request("Enter a valid enrollment id."))?;

    let exam = sqlx::query_as::<_, Exam>(
        "SELECT id, enrollment_id, attempt_number, digital_proof, supervisor_id, result
         FROM exams WHERE enrollment_id = ? AND supervisor_id = ?",
    )
    .bind(request.enrollment_id)
    .bind(request.supervisor_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| {
        ApiError::permission_denied("The supervisor has no permissions over this exam.")
    })?;

    let status = EnrollmentStatus::from_result(request.result);

    sqlx::query("UPDATE exams SET result = ? WHERE id = ?")
        .bind(request.result)
        .bind(exam.id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE enrollments SET status = ? WHERE id = ?")
        .bind(status)
        .bind(enrollment.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    tracing::info!(
        enrollment_id = enrollment.id,
        result = request.result,
        status = %status,
        "exam evaluated"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "The evaluation has been done."
        })),
    ))
}
