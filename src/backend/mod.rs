//! Backend client adapter.
//!
//! # Data Flow
//! ```text
//! handler / auth middleware
//!     → Backend (domain calls, status-code mapping, logging, metrics)
//!     → TodoRpc (GrpcTransport over tonic, or MockBackend)
//!     → todo.v1.ToDoService
//! ```
//!
//! Backend failures are normalised into [`BackendError`]: not-found,
//! permission-denied, or internal with the original status kept for logs.
//! Every call is a single attempt.

pub mod mock;
pub mod proto;
pub mod rpc;

use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tonic::{Code, Status};

use crate::model::{TodoItem, User};
use crate::observability::metrics;

pub use mock::MockBackend;
pub use rpc::{GrpcTransport, TodoRpc};

/// Failure of a backend call, as seen by the HTTP layer.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("todo item not found")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("backend internal error: {0}")]
    Internal(#[source] Status),
}

impl BackendError {
    /// Internal error detected on the gateway side of the call.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(Status::internal(message))
    }

    fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::PermissionDenied => "permission_denied",
            Self::Internal(_) => "internal",
        }
    }
}

/// Domain view of the backend service. Cheap to clone.
#[derive(Clone)]
pub struct Backend {
    rpc: Arc<dyn TodoRpc>,
}

impl Backend {
    pub fn new(rpc: Arc<dyn TodoRpc>) -> Self {
        Self { rpc }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, BackendError> {
        let start = Instant::now();
        let result = self
            .rpc
            .login(proto::LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
            .map(|resp| User::with_token(resp.token))
            .map_err(|status| match status.code() {
                Code::PermissionDenied => BackendError::PermissionDenied,
                _ => BackendError::Internal(status),
            });
        observe("login", start, result)
    }

    /// Any backend failure, including an unknown token, is internal here.
    pub async fn logout(&self, user: &User) -> Result<(), BackendError> {
        let start = Instant::now();
        let result = match &user.token {
            Some(token) => self
                .rpc
                .logout(proto::LogoutRequest {
                    token: token.clone(),
                })
                .await
                .map(|_| ())
                .map_err(BackendError::Internal),
            None => Err(BackendError::internal("logout without token")),
        };
        observe("logout", start, result)
    }

    pub async fn check_secret(&self, secret: &str) -> Result<User, BackendError> {
        let start = Instant::now();
        let result = self
            .rpc
            .check_secret(proto::CheckSecretRequest {
                secret: secret.to_string(),
            })
            .await
            .map(|resp| User {
                id: Some(resp.user_id),
                email: Some(resp.email),
                token: Some(secret.to_string()),
            })
            .map_err(|status| match status.code() {
                Code::PermissionDenied | Code::Unauthenticated | Code::InvalidArgument => {
                    BackendError::PermissionDenied
                }
                _ => BackendError::Internal(status),
            });
        observe("check_secret", start, result)
    }

    pub async fn create_task(&self, owner: &User, title: &str) -> Result<TodoItem, BackendError> {
        let start = Instant::now();
        let result = match owner.id {
            Some(user_id) => self
                .rpc
                .create_task(proto::CreateTaskRequest {
                    title: title.to_string(),
                    user_id,
                })
                .await
                .map(|resp| TodoItem {
                    id: Some(resp.task_id),
                    title: Some(title.to_string()),
                    is_done: Some(false),
                    owner: Some(owner.clone()),
                })
                .map_err(BackendError::Internal),
            None => Err(BackendError::internal("create task without owner")),
        };
        observe("create_task", start, result)
    }

    pub async fn get_task_by_id(&self, owner: &User, id: u64) -> Result<TodoItem, BackendError> {
        let start = Instant::now();
        let result = match owner.id {
            Some(user_id) => self
                .rpc
                .get_task_by_id(proto::TaskByIdRequest {
                    task_id: id,
                    user_id,
                })
                .await
                .map(|resp| TodoItem {
                    id: Some(id),
                    title: Some(resp.title),
                    is_done: Some(resp.is_done),
                    owner: Some(owner.clone()),
                })
                .map_err(not_found_or_internal),
            None => Err(BackendError::internal("get task without owner")),
        };
        observe("get_task_by_id", start, result)
    }

    pub async fn get_task_list(&self, owner: &User) -> Result<Vec<TodoItem>, BackendError> {
        let start = Instant::now();
        let result = match owner.id {
            Some(user_id) => self
                .rpc
                .list_tasks(proto::ListTasksRequest { user_id })
                .await
                .map(|resp| {
                    resp.tasks
                        .into_iter()
                        .map(|task| TodoItem {
                            id: Some(task.task_id),
                            title: Some(task.title),
                            is_done: Some(task.is_done),
                            owner: Some(owner.clone()),
                        })
                        .collect()
                })
                .map_err(BackendError::Internal),
            None => Err(BackendError::internal("list tasks without owner")),
        };
        observe("get_task_list", start, result)
    }

    /// Returns the item as submitted; the update RPC carries no item back.
    pub async fn update_task_by_id(&self, item: TodoItem) -> Result<TodoItem, BackendError> {
        let start = Instant::now();
        let result = match (item.id, item.owner_id()) {
            (Some(task_id), Some(user_id)) => self
                .rpc
                .update_task_by_id(proto::UpdateTaskByIdRequest {
                    task_id,
                    user_id,
                    title: item.title.clone(),
                    is_done: item.is_done,
                })
                .await
                .map(|_| item)
                .map_err(not_found_or_internal),
            _ => Err(BackendError::internal("update task without id or owner")),
        };
        observe("update_task_by_id", start, result)
    }

    pub async fn delete_task_by_id(&self, item: &TodoItem) -> Result<(), BackendError> {
        let start = Instant::now();
        let result = match (item.id, item.owner_id()) {
            (Some(task_id), Some(user_id)) => self
                .rpc
                .delete_task_by_id(proto::TaskByIdRequest { task_id, user_id })
                .await
                .map(|_| ())
                .map_err(not_found_or_internal),
            _ => Err(BackendError::internal("delete task without id or owner")),
        };
        observe("delete_task_by_id", start, result)
    }
}

fn not_found_or_internal(status: Status) -> BackendError {
    match status.code() {
        Code::NotFound => BackendError::NotFound,
        _ => BackendError::Internal(status),
    }
}

/// Record the call outcome and log internal causes with call-site context.
fn observe<T>(
    method: &'static str,
    start: Instant,
    result: Result<T, BackendError>,
) -> Result<T, BackendError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    metrics::record_backend_call(method, outcome, start);

    if let Err(BackendError::Internal(status)) = &result {
        tracing::error!(
            module = "backend",
            method,
            code = ?status.code(),
            error = %status.message(),
            "backend call failed"
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{MOCK_EMAIL, MOCK_PASSWORD, MOCK_USER_ID};

    fn backend() -> Backend {
        Backend::new(Arc::new(MockBackend::new()))
    }

    fn unavailable() -> Backend {
        Backend::new(Arc::new(MockBackend::unavailable()))
    }

    #[tokio::test]
    async fn check_secret_resolves_user() {
        let user = backend().check_secret(&MockBackend::token()).await.unwrap();
        assert_eq!(user.id, Some(MOCK_USER_ID));
        assert_eq!(user.email.as_deref(), Some(MOCK_EMAIL));
        assert_eq!(user.token, Some(MockBackend::token()));
    }

    #[tokio::test]
    async fn check_secret_rejects_bad_tokens() {
        let backend = backend();
        for token in ["", "1:wronguser", "1:user1:data"] {
            let err = backend.check_secret(token).await.unwrap_err();
            assert!(
                matches!(err, BackendError::PermissionDenied),
                "token {:?} gave {:?}",
                token,
                err
            );
        }
    }

    #[tokio::test]
    async fn check_secret_server_unavailable() {
        let err = unavailable()
            .check_secret(&MockBackend::token())
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Internal(_)));
    }

    #[tokio::test]
    async fn login_valid() {
        let user = backend().login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();
        assert_eq!(user.token, Some(MockBackend::token()));
        assert_eq!(user.id, None);
    }

    #[tokio::test]
    async fn login_invalid() {
        let backend = backend();
        let cases = [("", ""), ("", "pass"), ("user1", ""), ("user1", "invalid")];
        for (email, password) in cases {
            let err = backend.login(email, password).await.unwrap_err();
            assert!(matches!(err, BackendError::PermissionDenied));
        }
    }

    #[tokio::test]
    async fn login_server_unavailable() {
        let err = unavailable().login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap_err();
        assert!(matches!(err, BackendError::Internal(_)));
    }

    #[tokio::test]
    async fn logout_invalid_tokens_are_internal() {
        let backend = backend();
        for token in ["", "1:invalid"] {
            let err = backend.logout(&User::with_token(token)).await.unwrap_err();
            assert!(matches!(err, BackendError::Internal(_)));
        }
        let err = backend.logout(&User::default()).await.unwrap_err();
        assert!(matches!(err, BackendError::Internal(_)));
    }

    #[tokio::test]
    async fn login_logout_sequence() {
        let backend = backend();
        let user = backend.login(MOCK_EMAIL, MOCK_PASSWORD).await.unwrap();

        backend.logout(&user).await.unwrap();

        // The token is blacklisted after the first logout.
        let err = backend.logout(&user).await.unwrap_err();
        assert!(matches!(err, BackendError::Internal(_)));
    }

    #[tokio::test]
    async fn task_round_trip() {
        let backend = backend();
        let owner = User::with_id(MOCK_USER_ID);

        let created = backend.create_task(&owner, "buy milk").await.unwrap();
        assert_eq!(created.title.as_deref(), Some("buy milk"));
        assert_eq!(created.is_done, Some(false));
        let id = created.id.unwrap();

        let updated = backend
            .update_task_by_id(TodoItem {
                is_done: Some(true),
                ..TodoItem::reference(owner.clone(), id)
            })
            .await
            .unwrap();
        assert_eq!(updated.is_done, Some(true));
        assert_eq!(updated.title, None);

        let fetched = backend.get_task_by_id(&owner, id).await.unwrap();
        assert_eq!(fetched.title.as_deref(), Some("buy milk"));
        assert_eq!(fetched.is_done, Some(true));

        let list = backend.get_task_list(&owner).await.unwrap();
        assert_eq!(list.len(), 1);

        backend
            .delete_task_by_id(&TodoItem::reference(owner.clone(), id))
            .await
            .unwrap();
        let err = backend
            .delete_task_by_id(&TodoItem::reference(owner.clone(), id))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound));

        let err = backend.get_task_by_id(&owner, id).await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
    }

    #[tokio::test]
    async fn missing_owner_never_reaches_backend() {
        let err = unavailable()
            .create_task(&User::default(), "title")
            .await
            .unwrap_err();
        match err {
            BackendError::Internal(status) => assert_eq!(status.code(), Code::Internal),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn update_missing_task_is_not_found() {
        let err = backend()
            .update_task_by_id(TodoItem::reference(User::with_id(MOCK_USER_ID), 404))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::NotFound));
    }
}
