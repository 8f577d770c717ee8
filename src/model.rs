//! Core domain types shared by the backend adapter and the HTTP layer.
//!
//! Every field is optional: which ones are populated depends on the call
//! that produced the value. `login` yields a token only, `check_secret`
//! yields id + email + token, and handlers build owners carrying only an id.

use serde::Deserialize;

/// A gateway user as seen by one call site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: Option<u64>,
    pub email: Option<String>,
    pub token: Option<String>,
}

impl User {
    /// Owner reference used to scope task operations.
    pub fn with_id(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Session reference used for logout.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }
}

/// A task-list item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoItem {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub is_done: Option<bool>,
    pub owner: Option<User>,
}

impl TodoItem {
    /// Reference to an existing item by id and owner.
    pub fn reference(owner: User, id: u64) -> Self {
        Self {
            id: Some(id),
            owner: Some(owner),
            ..Self::default()
        }
    }

    /// Id of the owning user, if known.
    pub fn owner_id(&self) -> Option<u64> {
        self.owner.as_ref().and_then(|o| o.id)
    }
}

/// Partial update payload. An absent field means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskItemChanges {
    pub title: Option<String>,
    pub is_done: Option<bool>,
}

impl TaskItemChanges {
    /// Apply the changes on top of an item reference.
    pub fn apply_to(self, item: TodoItem) -> TodoItem {
        TodoItem {
            title: self.title,
            is_done: self.is_done,
            ..item
        }
    }
}
