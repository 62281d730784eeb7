use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::{validate, ApiError, Activity, Board, Card, List};
use crate::services::cascade;

pub async fn list_boards(State(state): State<AppState>) -> Result<Json<Vec<Board>>, ApiError> {
    let db = state.require_db()?;

    let boards: Vec<Board> =
        sqlx::query_as("SELECT id, name, image, created_at, updated_at FROM boards")
            .fetch_all(db)
            .await?;

    Ok(Json(boards))
}

pub async fn create_board(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Board>, ApiError> {
    let db = state.require_db()?;
    let req = validate::new_board(&payload)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let board: Board = sqlx::query_as(
        "INSERT INTO boards (id, name, image, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING id, name, image, created_at, updated_at"
    )
    .bind(&id)
    .bind(&req.name)
    .bind(&req.image)
    .bind(&now)
    .bind(&now)
    .fetch_one(db)
    .await?;

    Ok(Json(board))
}

pub async fn get_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Board>, ApiError> {
    let db = state.require_db()?;

    let board: Option<Board> =
        sqlx::query_as("SELECT id, name, image, created_at, updated_at FROM boards WHERE id = ?")
            .bind(&id)
            .fetch_optional(db)
            .await?;

    board
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Board {} not found", id)))
}

pub async fn get_board_lists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<List>>, ApiError> {
    let db = state.require_db()?;
    require_board(db, &id).await?;

    let lists: Vec<List> = sqlx::query_as(
        "SELECT id, board_id, name, created_at, updated_at FROM lists WHERE board_id = ?",
    )
    .bind(&id)
    .fetch_all(db)
    .await?;

    Ok(Json(lists))
}

pub async fn get_board_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let db = state.require_db()?;
    require_board(db, &id).await?;

    let cards: Vec<Card> = sqlx::query_as(
        "SELECT id, list_id, board_id, name, description, created_at, updated_at FROM cards WHERE board_id = ?",
    )
    .bind(&id)
    .fetch_all(db)
    .await?;

    Ok(Json(cards))
}

pub async fn get_board_activities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let db = state.require_db()?;
    require_board(db, &id).await?;

    let activities: Vec<Activity> = sqlx::query_as(
        "SELECT id, board_id, text, created_at FROM activities WHERE board_id = ?",
    )
    .bind(&id)
    .fetch_all(db)
    .await?;

    Ok(Json(activities))
}

pub async fn update_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Board>, ApiError> {
    let patch = validate::board_patch(&payload)?;

    // An empty patch changes nothing; return the record without bumping
    // updated_at.
    if patch.name.is_none() && patch.image.is_none() {
        return get_board(State(state), Path(id)).await;
    }

    let db = state.require_db()?;
    let now = chrono::Utc::now().to_rfc3339();

    let board: Option<Board> = sqlx::query_as(
        "UPDATE boards SET name = COALESCE(?, name), image = COALESCE(?, image), updated_at = ? WHERE id = ? RETURNING id, name, image, created_at, updated_at"
    )
    .bind(&patch.name)
    .bind(&patch.image)
    .bind(&now)
    .bind(&id)
    .fetch_optional(db)
    .await?;

    board
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Board {} not found", id)))
}

/// Deletes the board, then sweeps its lists, their cards, and its activities.
/// The cascade is awaited in full before responding; sub-delete failures are
/// aggregated and surfaced instead of being dropped.
pub async fn delete_board(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Board>, ApiError> {
    let db = state.require_db()?;

    let board: Option<Board> = sqlx::query_as(
        "DELETE FROM boards WHERE id = ? RETURNING id, name, image, created_at, updated_at",
    )
    .bind(&id)
    .fetch_optional(db)
    .await?;

    let Some(board) = board else {
        return Err(ApiError::NotFound(format!("Board {} not found", id)));
    };

    let report = cascade::delete_board_dependents(db, &id).await;
    if !report.is_clean() {
        tracing::error!(board_id = %id, "Cascade incomplete: {}", report.summary());
        return Err(ApiError::Internal(format!(
            "Board {} deleted but cascade incomplete: {}",
            id,
            report.summary()
        )));
    }

    Ok(Json(board))
}

async fn require_board(db: &sqlx::SqlitePool, id: &str) -> Result<(), ApiError> {
    let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM boards WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;

    if exists.is_none() {
        return Err(ApiError::NotFound(format!("Board {} not found", id)));
    }
    Ok(())
}
