use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::domain::{validate, ApiError, Card};

pub async fn create_card(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Card>, ApiError> {
    let db = state.require_db()?;
    let req = validate::new_card(&payload)?;

    let id = Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let card: Card = sqlx::query_as(
        "INSERT INTO cards (id, list_id, board_id, name, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id, list_id, board_id, name, description, created_at, updated_at"
    )
    .bind(&id)
    .bind(&req.list_id)
    .bind(&req.board_id)
    .bind(&req.name)
    .bind(&req.description)
    .bind(&now)
    .bind(&now)
    .fetch_one(db)
    .await?;

    Ok(Json(card))
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    let db = state.require_db()?;

    let card: Option<Card> = sqlx::query_as(
        "SELECT id, list_id, board_id, name, description, created_at, updated_at FROM cards WHERE id = ?",
    )
    .bind(&id)
    .fetch_optional(db)
    .await?;

    card.map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Card {} not found", id)))
}

/// Patching `list_id` moves the card to another list.
pub async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<Card>, ApiError> {
    let patch = validate::card_patch(&payload)?;

    if patch.name.is_none() && patch.description.is_none() && patch.list_id.is_none() {
        return get_card(State(state), Path(id)).await;
    }

    let db = state.require_db()?;
    let now = chrono::Utc::now().to_rfc3339();

    let card: Option<Card> = sqlx::query_as(
        "UPDATE cards SET name = COALESCE(?, name), description = COALESCE(?, description), list_id = COALESCE(?, list_id), updated_at = ? WHERE id = ? RETURNING id, list_id, board_id, name, description, created_at, updated_at"
    )
    .bind(&patch.name)
    .bind(&patch.description)
    .bind(&patch.list_id)
    .bind(&now)
    .bind(&id)
    .fetch_optional(db)
    .await?;

    card.map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Card {} not found", id)))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    let db = state.require_db()?;

    let card: Option<Card> = sqlx::query_as(
        "DELETE FROM cards WHERE id = ? RETURNING id, list_id, board_id, name, description, created_at, updated_at",
    )
    .bind(&id)
    .fetch_optional(db)
    .await?;

    card.map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Card {} not found", id)))
}
