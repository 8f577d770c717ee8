//! HTTP payload types.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::model::TodoItem;

/// Response discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralResponse {
    pub status: ResponseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: ResponseStatus,
    pub token: String,
}

/// Task as exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: u64,
    pub title: String,
    pub is_done: bool,
}

impl TryFrom<TodoItem> for TaskItem {
    type Error = ApiError;

    fn try_from(item: TodoItem) -> Result<Self, Self::Error> {
        match (item.id, item.title, item.is_done) {
            (Some(id), Some(title), Some(is_done)) => Ok(Self { id, title, is_done }),
            _ => {
                tracing::error!(module = "http", method = "TaskItem::try_from", "Backend item is missing fields");
                Err(ApiError::Internal)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub status: ResponseStatus,
    pub task: TaskItem,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub status: ResponseStatus,
    pub tasks: Vec<TaskItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn incomplete_item_is_internal() {
        let item = TodoItem::reference(User::with_id(1), 3);
        assert!(matches!(TaskItem::try_from(item), Err(ApiError::Internal)));
    }

    #[test]
    fn task_serializes_with_is_done() {
        let task = TaskItem {
            id: 1,
            title: "buy milk".into(),
            is_done: false,
        };
        let value = serde_json::to_value(TaskResponse {
            status: ResponseStatus::Ok,
            task,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "status": "ok",
                "task": { "id": 1, "title": "buy milk", "is_done": false }
            })
        );
    }
}
