#![allow(dead_code)]

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use college_api::config::DatabaseConfig;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Fresh application over an in-memory database.
///
/// A single-connection pool keeps every statement on the one shared
/// in-memory handle; each test gets its own isolated database.
pub async fn test_app() -> Result<(Router, SqlitePool)> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
    };
    let pool = college_api::database::connect(&config).await?;
    college_api::database::init_schema(&pool).await?;
    Ok((college_api::app(pool.clone()), pool))
}

// Seed helpers for reference data the API has no endpoints for.

pub async fn seed_teacher(pool: &SqlitePool, name: &str) -> Result<i64> {
    let done = sqlx::query("INSERT INTO teachers (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(done.last_insert_rowid())
}

pub async fn seed_student(pool: &SqlitePool, name: &str, teacher_id: i64) -> Result<i64> {
    let done = sqlx::query("INSERT INTO students (name, teacher_id) VALUES (?, ?)")
        .bind(name)
        .bind(teacher_id)
        .execute(pool)
        .await?;
    Ok(done.last_insert_rowid())
}

pub async fn seed_class(pool: &SqlitePool, name: &str) -> Result<i64> {
    let done = sqlx::query("INSERT INTO classes (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(done.last_insert_rowid())
}

pub async fn seed_supervisor(pool: &SqlitePool, name: &str) -> Result<i64> {
    let done = sqlx::query("INSERT INTO supervisors (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(done.last_insert_rowid())
}

pub async fn seed_enrollment(
    pool: &SqlitePool,
    student_id: i64,
    class_id: i64,
    status: &str,
) -> Result<i64> {
    let done = sqlx::query("INSERT INTO enrollments (student_id, class_id, status) VALUES (?, ?, ?)")
        .bind(student_id)
        .bind(class_id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(done.last_insert_rowid())
}

pub async fn seed_exam(
    pool: &SqlitePool,
    enrollment_id: i64,
    supervisor_id: i64,
    attempt_number: i64,
    result: Option<f64>,
) -> Result<i64> {
    let done = sqlx::query(
        "INSERT INTO exams (enrollment_id, supervisor_id, attempt_number, result)
         VALUES (?, ?, ?, ?)",
    )
    .bind(enrollment_id)
    .bind(supervisor_id)
    .bind(attempt_number)
    .bind(result)
    .execute(pool)
    .await?;
    Ok(done.last_insert_rowid())
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

// Request helpers driving the router directly.

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?;
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    send(app, request).await
}

const BOUNDARY: &str = "college-api-test-boundary";

/// POST /submitExam with a hand-built multipart body.
pub async fn post_exam_submission(
    app: &Router,
    enrollment_id: Option<&str>,
    with_file: bool,
) -> Result<(StatusCode, Value)> {
    let mut body = String::new();
    if let Some(id) = enrollment_id {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"enrollment_id\"\r\n\r\n{id}\r\n"
        ));
    }
    if with_file {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"exam.pdf\"\r\n\
             Content-Type: application/pdf\r\n\r\nexam submission bytes\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    let request = Request::builder()
        .method("POST")
        .uri("/submitExam")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))?;
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok((status, body))
}
