use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::{validate, ApiError, Activity};

pub async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Activity>, ApiError> {
    let db = state.require_db()?;
    let req = validate::new_activity(&payload)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let activity: Activity = sqlx::query_as(
        "INSERT INTO activities (id, board_id, text, created_at) VALUES (?, ?, ?, ?) RETURNING id, board_id, text, created_at"
    )
    .bind(&id)
    .bind(&req.board_id)
    .bind(&req.text)
    .bind(&now)
    .fetch_one(db)
    .await?;

    Ok(Json(activity))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Activity>, ApiError> {
    let db = state.require_db()?;

    let activity: Option<Activity> = sqlx::query_as(
        "DELETE FROM activities WHERE id = ? RETURNING id, board_id, text, created_at",
    )
    .bind(&id)
    .fetch_optional(db)
    .await?;

    activity
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Activity {} not found", id)))
}
