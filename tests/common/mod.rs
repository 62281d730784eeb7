use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use kanban_board_api::api::{create_router, AppState};
use kanban_board_api::config::Config;

/// Single-connection in-memory pool: every connection to `sqlite::memory:`
/// gets its own database, so the pool must not open a second one.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn app(pool: SqlitePool) -> Router {
    let config = Arc::new(Config {
        port: 4000,
        database_url: "sqlite::memory:".to_string(),
        cors_origin: "http://localhost:3000".to_string(),
    });

    create_router(AppState::new(Some(pool), Arc::clone(&config)), &config)
}

pub async fn make_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri).method(method);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }

    let request = request.body(Body::from(body.unwrap_or_default())).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}
