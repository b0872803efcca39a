use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// Body of `POST /add/`. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodoRequest {
    pub title: String,
    pub description: String,
}

/// Body of `PUT /update/{id}`. Absent and `null` fields keep the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_ignores_client_supplied_id() {
        let req: NewTodoRequest =
            serde_json::from_str(r#"{"id": 42, "title": "t", "description": "d"}"#).unwrap();
        assert_eq!(req.title, "t");
        assert_eq!(req.description, "d");
    }

    #[test]
    fn new_todo_requires_both_fields() {
        assert!(serde_json::from_str::<NewTodoRequest>(r#"{"title": "t"}"#).is_err());
        assert!(serde_json::from_str::<NewTodoRequest>(r#"{"title": 1, "description": "d"}"#).is_err());
    }

    #[test]
    fn update_treats_null_and_absent_alike() {
        let req: UpdateTodoRequest =
            serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(req.title, None);
        assert_eq!(req.description, None);

        let req: UpdateTodoRequest =
            serde_json::from_str(r#"{"description": "d2"}"#).unwrap();
        assert_eq!(req.title, None);
        assert_eq!(req.description.as_deref(), Some("d2"));
    }

    #[test]
    fn update_omits_unset_fields_when_serialized() {
        let req = UpdateTodoRequest {
            title: Some("t".to_string()),
            description: None,
        };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"title":"t"}"#);
    }
}
