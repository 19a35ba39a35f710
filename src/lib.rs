use axum::extract::State;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;

/// Build the application router around a shared connection pool.
///
/// The pool is the only piece of shared state; every handler opens and
/// commits its own transaction on it.
pub fn app(pool: SqlitePool) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Workflow routes
        .merge(student_routes())
        .merge(teacher_routes())
        .merge(supervisor_routes())
        .merge(coordinator_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

fn student_routes() -> Router<SqlitePool> {
    use axum::routing::post;
    use handlers::student;

    Router::new()
        .route("/assignStudent", post(student::assign_post))
        .route("/submitExam", post(student::submit_post))
        .route("/results", get(student::results_get))
}

fn teacher_routes() -> Router<SqlitePool> {
    use axum::routing::post;
    use handlers::teacher;

    Router::new().route("/enrollClasses", post(teacher::enroll_post))
}

fn supervisor_routes() -> Router<SqlitePool> {
    use axum::routing::post;
    use handlers::supervisor;

    Router::new().route("/evaluateExam", post(supervisor::evaluate_exam_post))
}

fn coordinator_routes() -> Router<SqlitePool> {
    use handlers::coordinator;

    Router::new().route("/evaluateStudent/:student_id", get(coordinator::evaluate_student_get))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "College API",
            "version": version,
            "description": "School exam-tracking backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "assign_student": "POST /assignStudent",
                "enroll_classes": "POST /enrollClasses",
                "submit_exam": "POST /submitExam (multipart)",
                "evaluate_exam": "POST /evaluateExam",
                "results": "GET /results?top=N",
                "evaluate_student": "GET /evaluateStudent/:student_id",
            }
        }
    }))
}

async fn health(State(pool): State<SqlitePool>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
