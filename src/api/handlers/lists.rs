use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::{validate, ApiError, Card, List};
use crate::services::cascade;

pub async fn create_list(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<List>, ApiError> {
    let db = state.require_db()?;
    let req = validate::new_list(&payload)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let list: List = sqlx::query_as(
        "INSERT INTO lists (id, board_id, name, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING id, board_id, name, created_at, updated_at"
    )
    .bind(&id)
    .bind(&req.board_id)
    .bind(&req.name)
    .bind(&now)
    .bind(&now)
    .fetch_one(db)
    .await?;

    Ok(Json(list))
}

pub async fn get_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<List>, ApiError> {
    let db = state.require_db()?;

    let list: Option<List> = sqlx::query_as(
        "SELECT id, board_id, name, created_at, updated_at FROM lists WHERE id = ?",
    )
    .bind(&id)
    .fetch_optional(db)
    .await?;

    list.map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("List {} not found", id)))
}

pub async fn get_list_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let db = state.require_db()?;

    let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM lists WHERE id = ?")
        .bind(&id)
        .fetch_optional(db)
        .await?;
    if exists.is_none() {
        return Err(ApiError::NotFound(format!("List {} not found", id)));
    }

    let cards: Vec<Card> = sqlx::query_as(
        "SELECT id, list_id, board_id, name, description, created_at, updated_at FROM cards WHERE list_id = ?",
    )
    .bind(&id)
    .fetch_all(db)
    .await?;

    Ok(Json(cards))
}

pub async fn update_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<List>, ApiError> {
    let patch = validate::list_patch(&payload)?;

    if patch.name.is_none() {
        return get_list(State(state), Path(id)).await;
    }

    let db = state.require_db()?;
    let now = chrono::Utc::now().to_rfc3339();

    let list: Option<List> = sqlx::query_as(
        "UPDATE lists SET name = COALESCE(?, name), updated_at = ? WHERE id = ? RETURNING id, board_id, name, created_at, updated_at"
    )
    .bind(&patch.name)
    .bind(&now)
    .bind(&id)
    .fetch_optional(db)
    .await?;

    list.map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("List {} not found", id)))
}

/// Deletes the list and its cards, awaited before responding.
pub async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<List>, ApiError> {
    let db = state.require_db()?;

    let list: Option<List> = sqlx::query_as(
        "DELETE FROM lists WHERE id = ? RETURNING id, board_id, name, created_at, updated_at",
    )
    .bind(&id)
    .fetch_optional(db)
    .await?;

    let Some(list) = list else {
        return Err(ApiError::NotFound(format!("List {} not found", id)));
    };

    let deleted = cascade::delete_list_cards(db, &id).await?;
    tracing::debug!(list_id = %id, "Deleted list and {} cards", deleted);

    Ok(Json(list))
}
