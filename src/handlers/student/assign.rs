use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct AssignStudentRequest {
    pub teacher_id: i64,
    pub student_name: String,
}

impl AssignStudentRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.student_name.trim().is_empty() {
            let mut field_errors = HashMap::new();
            field_errors.insert("student_name".to_string(), "must not be empty".to_string());
            return Err(ApiError::validation_error("Invalid student name", Some(field_errors)));
        }
        Ok(())
    }
}

/// POST /assignStudent - create a student bound to a teacher
///
/// Student names are globally unique; a second assignment under the same
/// name is reported as a duplicate, not silently merged.
pub async fn post(
    State(pool): State<SqlitePool>,
    Json(request): Json<AssignStudentRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    request.validate()?;

    let mut tx = pool.begin().await?;

    let inserted = sqlx::query("INSERT INTO students (name, teacher_id) VALUES (?, ?)")
        .bind(&request.student_name)
        .bind(request.teacher_id)
        .execute(&mut *tx)
        .await;

    match inserted {
        Ok(_) => {}
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(ApiError::duplicate_entity("Student already assigned."));
        }
        Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
            return Err(ApiError::bad_request("Enter a valid teacher id."));
        }
        Err(e) => return Err(e.into()),
    }

    tx.commit().await?;
    tracing::info!(
        student = %request.student_name,
        teacher_id = request.teacher_id,
        "student assigned"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "The student has been assigned."
        })),
    ))
}
