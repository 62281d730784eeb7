//! Pure payload validation, separated from persistence so it can be unit
//! tested without a live store. Handlers call these before touching the pool.

use serde_json::Value;

use crate::domain::ApiError;

#[derive(Debug, PartialEq)]
pub struct NewBoard {
    pub name: String,
    pub image: String,
}

#[derive(Debug, PartialEq)]
pub struct NewList {
    pub board_id: String,
    pub name: String,
}

#[derive(Debug, PartialEq)]
pub struct NewCard {
    pub board_id: String,
    pub list_id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, PartialEq)]
pub struct NewActivity {
    pub board_id: String,
    pub text: String,
}

/// Patch payloads keep absent fields as `None`; present fields have already
/// passed the type and non-empty checks.
#[derive(Debug, Default, PartialEq)]
pub struct BoardPatch {
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct ListPatch {
    pub name: Option<String>,
}

#[derive(Debug, Default, PartialEq)]
pub struct CardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub list_id: Option<String>,
}

pub fn new_board(payload: &Value) -> Result<NewBoard, ApiError> {
    Ok(NewBoard {
        name: required_str(payload, "name")?,
        image: required_str(payload, "image")?,
    })
}

pub fn new_list(payload: &Value) -> Result<NewList, ApiError> {
    Ok(NewList {
        board_id: required_str(payload, "board_id")?,
        name: required_str(payload, "name")?,
    })
}

pub fn new_card(payload: &Value) -> Result<NewCard, ApiError> {
    Ok(NewCard {
        board_id: required_str(payload, "board_id")?,
        list_id: required_str(payload, "list_id")?,
        name: required_str(payload, "name")?,
        description: optional_str(payload, "description")?.unwrap_or_default(),
    })
}

pub fn new_activity(payload: &Value) -> Result<NewActivity, ApiError> {
    Ok(NewActivity {
        board_id: required_str(payload, "board_id")?,
        text: required_str(payload, "text")?,
    })
}

pub fn board_patch(payload: &Value) -> Result<BoardPatch, ApiError> {
    allowed_keys(payload, &["name", "image"])?;
    Ok(BoardPatch {
        name: patch_str(payload, "name")?,
        image: patch_str(payload, "image")?,
    })
}

pub fn list_patch(payload: &Value) -> Result<ListPatch, ApiError> {
    allowed_keys(payload, &["name"])?;
    Ok(ListPatch {
        name: patch_str(payload, "name")?,
    })
}

pub fn card_patch(payload: &Value) -> Result<CardPatch, ApiError> {
    allowed_keys(payload, &["name", "description", "list_id"])?;
    Ok(CardPatch {
        name: patch_str(payload, "name")?,
        description: optional_str(payload, "description")?,
        list_id: patch_str(payload, "list_id")?,
    })
}

/// Rejects the whole patch if any key falls outside the allowed set. Runs
/// before any store call; no partial application.
fn allowed_keys(payload: &Value, allowed: &[&str]) -> Result<(), ApiError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ApiError::Validation("expected a JSON object".into()))?;

    for key in obj.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(ApiError::InvalidUpdateFields(format!(
                "field '{}' is not updatable (allowed: {})",
                key,
                allowed.join(", ")
            )));
        }
    }
    Ok(())
}

fn required_str(payload: &Value, key: &str) -> Result<String, ApiError> {
    match payload.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(ApiError::Validation(format!(
            "field '{}' must not be empty",
            key
        ))),
        Some(_) => Err(ApiError::Validation(format!(
            "field '{}' must be a string",
            key
        ))),
        None => Err(ApiError::Validation(format!(
            "field '{}' is required",
            key
        ))),
    }
}

/// Present and a string, or absent. Empty strings are allowed.
fn optional_str(payload: &Value, key: &str) -> Result<Option<String>, ApiError> {
    match payload.get(key) {
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::Validation(format!(
            "field '{}' must be a string",
            key
        ))),
        None => Ok(None),
    }
}

/// Present, a string and non-empty, or absent.
fn patch_str(payload: &Value, key: &str) -> Result<Option<String>, ApiError> {
    match payload.get(key) {
        Some(_) => required_str(payload, key).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_board_accepts_valid_payload() {
        let board = new_board(&json!({"name": "Sprint", "image": "https://x/bg.png"})).unwrap();
        assert_eq!(board.name, "Sprint");
        assert_eq!(board.image, "https://x/bg.png");
    }

    #[test]
    fn new_board_rejects_missing_required_field() {
        let err = new_board(&json!({"name": "Sprint"})).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn new_board_rejects_empty_name() {
        let err = new_board(&json!({"name": "  ", "image": "x"})).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn new_board_rejects_non_string_field() {
        let err = new_board(&json!({"name": "Sprint", "image": 42})).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn board_patch_rejects_disallowed_key() {
        let err = board_patch(&json!({"color": "red"})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUpdateFields(_)));
    }

    #[test]
    fn board_patch_rejects_mixed_allowed_and_disallowed_keys() {
        let err = board_patch(&json!({"name": "X", "owner": "me"})).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUpdateFields(_)));
    }

    #[test]
    fn board_patch_accepts_subset() {
        let patch = board_patch(&json!({"name": "Renamed"})).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Renamed"));
        assert_eq!(patch.image, None);
    }

    #[test]
    fn board_patch_empty_object_is_a_noop() {
        assert_eq!(board_patch(&json!({})).unwrap(), BoardPatch::default());
    }

    #[test]
    fn board_patch_revalidates_values() {
        let err = board_patch(&json!({"name": ""})).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn board_patch_rejects_non_object() {
        let err = board_patch(&json!(["name"])).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn new_card_defaults_description() {
        let card = new_card(&json!({
            "board_id": "b1",
            "list_id": "l1",
            "name": "Task"
        }))
        .unwrap();
        assert_eq!(card.description, "");
    }

    #[test]
    fn card_patch_allows_moving_between_lists() {
        let patch = card_patch(&json!({"list_id": "l2"})).unwrap();
        assert_eq!(patch.list_id.as_deref(), Some("l2"));
    }

    #[test]
    fn new_activity_requires_text() {
        let err = new_activity(&json!({"board_id": "b1"})).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
