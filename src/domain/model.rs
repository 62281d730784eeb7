use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Top-level container entity. Deleting a board sweeps its lists, cards and
/// activities in the same request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub image: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A column within a board. `board_id` is a plain reference, not enforced by
/// the schema; an orphaned list is unreachable through board-scoped queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct List {
    pub id: String,
    pub board_id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An item within a list. `board_id` is denormalized so the board-scoped card
/// query does not have to join through lists.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    pub id: String,
    pub list_id: String,
    pub board_id: String,
    pub name: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An audit/event record associated with a board.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: String,
    pub board_id: String,
    pub text: String,
    pub created_at: String,
}
