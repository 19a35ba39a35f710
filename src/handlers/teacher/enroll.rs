use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::models::Student;
use crate::error::ApiError;

/// Enrollment requests below this size are rejected outright.
const MIN_CLASSES: usize = 5;

#[derive(Debug, Deserialize)]
pub struct EnrollClassesRequest {
    pub teacher_id: i64,
    pub student_id: i64,
    pub classes: Vec<i64>,
}

impl EnrollClassesRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.classes.len() < MIN_CLASSES {
            let mut field_errors = HashMap::new();
            field_errors.insert(
                "classes".to_string(),
                format!("at least {} class ids required", MIN_CLASSES),
            );
            return Err(ApiError::validation_error(
                "Minimum 5 classes for enrollment",
                Some(field_errors),
            ));
        }
        Ok(())
    }
}

/// POST /enrollClasses - enroll a student in a batch of classes
///
/// The batch is all-or-nothing: one row per class id inside a single
/// transaction, and any collision with an existing (student, class) pair
/// rolls every insert back.
pub async fn post(
    State(pool): State<SqlitePool>,
    Json(request): Json<EnrollClassesRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    request.validate()?;

    // Ownership check before any write: the student must belong to the
    // requesting teacher.
    let student = sqlx::query_as::<_, Student>(
        "SELECT id, name, teacher_id FROM students WHERE id = ? AND teacher_id = ?",
    )
    .bind(request.student_id)
    .bind(request.teacher_id)
    .fetch_optional(&pool)
    .await?;

    if student.is_none() {
        return Err(ApiError::permission_denied(
            "The teacher has no permissions over this student.",
        ));
    }

    let mut tx = pool.begin().await?;

    for class_id in &request.classes {
        let inserted = sqlx::query("INSERT INTO enrollments (student_id, class_id) VALUES (?, ?)")
            .bind(request.student_id)
            .bind(class_id)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                // Dropping the transaction rolls the whole batch back.
                return Err(ApiError::duplicate_entity("The enrollment has been done before."));
            }
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                return Err(ApiError::bad_request("Enter valid class ids."));
            }
            Err(e) => return Err(e.into()),
        }
    }

    tx.commit().await?;
    tracing::info!(
        student_id = request.student_id,
        classes = request.classes.len(),
        "student enrolled"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "The enrollment has been done."
        })),
    ))
}
