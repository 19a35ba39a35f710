mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;
use sqlx::SqlitePool;

struct Graded {
    enrollment_id: i64,
    supervisor_id: i64,
}

/// Enrollment with an exam waiting to be graded by its supervisor.
async fn seed_pending_exam(pool: &SqlitePool) -> Result<Graded> {
    let teacher_id = common::seed_teacher(pool, "Turing").await?;
    let student_id = common::seed_student(pool, "Ada", teacher_id).await?;
    let class_id = common::seed_class(pool, "Computability").await?;
    let enrollment_id = common::seed_enrollment(pool, student_id, class_id, "InProgress").await?;
    let supervisor_id = common::seed_supervisor(pool, "Hilbert").await?;
    common::seed_exam(pool, enrollment_id, supervisor_id, 0, None).await?;
    Ok(Graded { enrollment_id, supervisor_id })
}

async fn enrollment_status(pool: &SqlitePool, enrollment_id: i64) -> Result<String> {
    let row: (String,) = sqlx::query_as("SELECT status FROM enrollments WHERE id = ?")
        .bind(enrollment_id)
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}

async fn evaluate(
    app: &axum::Router,
    graded: &Graded,
    result: f64,
) -> Result<(StatusCode, serde_json::Value)> {
    common::post_json(
        app,
        "/evaluateExam",
        json!({
            "supervisor_id": graded.supervisor_id,
            "enrollment_id": graded.enrollment_id,
            "result": result
        }),
    )
    .await
}

#[tokio::test]
async fn result_below_two_disapproves() -> Result<()> {
    let (app, pool) = common::test_app().await?;
    let graded = seed_pending_exam(&pool).await?;

    let (status, body) = evaluate(&app, &graded, 1.9).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "The evaluation has been done.");
    assert_eq!(enrollment_status(&pool, graded.enrollment_id).await?, "Disapproved");

    Ok(())
}

#[tokio::test]
async fn result_of_two_is_conditional() -> Result<()> {
    let (app, pool) = common::test_app().await?;
    let graded = seed_pending_exam(&pool).await?;

    let (status, _) = evaluate(&app, &graded, 2.0).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrollment_status(&pool, graded.enrollment_id).await?, "Conditional");

    Ok(())
}

#[tokio::test]
async fn result_of_three_and_a_half_approves() -> Result<()> {
    let (app, pool) = common::test_app().await?;
    let graded = seed_pending_exam(&pool).await?;

    let (status, _) = evaluate(&app, &graded, 3.5).await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrollment_status(&pool, graded.enrollment_id).await?, "Approved");

    let row: (Option<f64>,) = sqlx::query_as("SELECT result FROM exams WHERE enrollment_id = ?")
        .bind(graded.enrollment_id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(row.0, Some(3.5));

    Ok(())
}

#[tokio::test]
async fn only_the_assigned_supervisor_may_grade() -> Result<()> {
    let (app, pool) = common::test_app().await?;
    let graded = seed_pending_exam(&pool).await?;
    let intruder_id = common::seed_supervisor(&pool, "Noether").await?;

    let (status, body) = common::post_json(
        &app,
        "/evaluateExam",
        json!({
            "supervisor_id": intruder_id,
            "enrollment_id": graded.enrollment_id,
            "result": 4.0
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "PERMISSION_DENIED");
    // No mutation: status and result stay untouched.
    assert_eq!(enrollment_status(&pool, graded.enrollment_id).await?, "InProgress");

    Ok(())
}

#[tokio::test]
async fn unknown_enrollment_is_a_client_error() -> Result<()> {
    let (app, pool) = common::test_app().await?;
    let supervisor_id = common::seed_supervisor(&pool, "Hilbert").await?;

    let (status, body) = common::post_json(
        &app,
        "/evaluateExam",
        json!({ "supervisor_id": supervisor_id, "enrollment_id": 999, "result": 4.0 }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Enter a valid enrollment id.");

    Ok(())
}

#[tokio::test]
async fn out_of_range_result_is_rejected_before_lookup() -> Result<()> {
    let (app, pool) = common::test_app().await?;
    let graded = seed_pending_exam(&pool).await?;

    for bad_result in [-1.0, 5.5] {
        let (status, body) = evaluate(&app, &graded, bad_result).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    assert_eq!(enrollment_status(&pool, graded.enrollment_id).await?, "InProgress");

    Ok(())
}
