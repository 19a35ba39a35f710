use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::models::{Enrollment, EnrollmentStatus, Exam, Supervisor};
use crate::error::ApiError;

/// POST /submitExam - record an exam submission for an enrollment
///
/// Multipart form with a text `enrollment_id` part and a `file` part. The
/// file content is not graded here; its presence is what marks a
/// submission. Per enrollment there is a single exam row:
/// - first submission creates it at attempt 0 with a randomly assigned
///   supervisor,
/// - while the enrollment is `Conditional` each resubmission bumps the
///   attempt counter, up to 3,
/// - any other status means the exam was already evaluated and the
///   submission is refused without mutation.
pub async fn post(
    State(pool): State<SqlitePool>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut enrollment_id: Option<i64> = None;
    let mut has_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("enrollment_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                let parsed = text.trim().parse::<i64>().map_err(|_| {
                    let mut field_errors = HashMap::new();
                    field_errors
                        .insert("enrollment_id".to_string(), "must be an integer".to_string());
                    ApiError::validation_error("Invalid enrollment id", Some(field_errors))
                })?;
                enrollment_id = Some(parsed);
            }
            Some("file") => {
                let _ = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                has_file = true;
            }
            _ => {
                // Unknown parts are drained and ignored.
                let _ = field.bytes().await.ok();
            }
        }
    }

    if !has_file {
        return Err(ApiError::bad_request("No exam attached."));
    }

    let enrollment_id = enrollment_id.ok_or_else(|| {
        let mut field_errors = HashMap::new();
        field_errors.insert("enrollment_id".to_string(), "This field is required".to_string());
        ApiError::validation_error("Missing required fields", Some(field_errors))
    })?;

    let mut tx = pool.begin().await?;

    let enrollment = sqlx::query_as::<_, Enrollment>(
        "SELECT id, student_id, class_id, status FROM enrollments WHERE id = ?",
    )
    .bind(enrollment_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| ApiError::bad_request("Enter a valid enrollment id."))?;

    let exam = sqlx::query_as::<_, Exam>(
        "SELECT id, enrollment_id, attempt_number, digital_proof, supervisor_id, result
         FROM exams WHERE enrollment_id = ?",
    )
    .bind(enrollment_id)
    .fetch_optional(&mut *tx)
    .await?;

    let (status, body) = match exam {
        None => {
            // First submission: assign a supervisor uniformly at random.
            let supervisor = sqlx::query_as::<_, Supervisor>(
                "SELECT id, name FROM supervisors ORDER BY RANDOM() LIMIT 1",
            )
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::bad_request("No supervisor available."))?;

            sqlx::query("INSERT INTO exams (enrollment_id, supervisor_id) VALUES (?, ?)")
                .bind(enrollment_id)
                .bind(supervisor.id)
                .execute(&mut *tx)
                .await?;

            tracing::info!(
                enrollment_id,
                supervisor_id = supervisor.id,
                "exam submitted"
            );

            (
                StatusCode::CREATED,
                json!({ "success": true, "message": "The exam was sent." }),
            )
        }
        Some(exam) if enrollment.status == EnrollmentStatus::Conditional => {
            if exam.attempts_exhausted() {
                (
                    StatusCode::OK,
                    json!({
                        "success": false,
                        "message": "The maximum number of attempts for this exam has been reached."
                    }),
                )
            } else {
                sqlx::query("UPDATE exams SET attempt_number = attempt_number + 1 WHERE id = ?")
                    .bind(exam.id)
                    .execute(&mut *tx)
                    .await?;

                tracing::info!(
                    enrollment_id,
                    attempt = exam.attempt_number + 1,
                    "exam resubmitted"
                );

                (
                    StatusCode::CREATED,
                    json!({ "success": true, "message": "The exam was sent." }),
                )
            }
        }
        Some(_) => (
            StatusCode::OK,
            json!({
                "success": false,
                "message": "Exam already evaluated.",
                "status": enrollment.status
            }),
        ),
    };

    tx.commit().await?;

    Ok((status, Json(body)))
}
