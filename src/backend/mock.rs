//! In-process reference backend.
//!
//! Knows a single account (`user1` / `pass`, id 1) whose session token is
//! `1:user1`. Logging out blacklists the token, after which it no longer
//! validates. Tasks live in memory and are scoped by owner.

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use tonic::Status;

use super::proto::{
    ChangedTaskByIdResponse, CheckSecretRequest, CheckSecretResponse, CreateTaskRequest,
    CreateTaskResponse, GetTaskByIdResponse, ListTasksRequest, ListTasksResponse, LoginRequest,
    LoginResponse, LogoutRequest, LogoutResponse, TaskByIdRequest, TaskItem,
    UpdateTaskByIdRequest,
};
use super::rpc::TodoRpc;

pub const MOCK_EMAIL: &str = "user1";
pub const MOCK_PASSWORD: &str = "pass";
pub const MOCK_USER_ID: u64 = 1;

#[derive(Debug, Clone)]
struct StoredTask {
    owner: u64,
    title: String,
    is_done: bool,
}

/// Reference implementation of the backend service.
#[derive(Debug, Default)]
pub struct MockBackend {
    is_down: bool,
    blacklist: DashSet<String>,
    tasks: DashMap<u64, StoredTask>,
    next_id: AtomicU64,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call fails as if the service were unreachable.
    pub fn unavailable() -> Self {
        Self {
            is_down: true,
            ..Self::default()
        }
    }

    /// Token issued to the reference account.
    pub fn token() -> String {
        format!("{}:{}", MOCK_USER_ID, MOCK_EMAIL)
    }

    fn ensure_up(&self) -> Result<(), Status> {
        if self.is_down {
            return Err(Status::unavailable("service is down"));
        }
        Ok(())
    }

    /// Tokens are `<user id>:<email>`.
    fn decode_token(token: &str) -> Option<(u64, &str)> {
        let (id, email) = token.split_once(':')?;
        if email.is_empty() || email.contains(':') {
            return None;
        }
        Some((id.parse().ok()?, email))
    }

    fn is_valid_session(&self, token: &str) -> bool {
        matches!(
            Self::decode_token(token),
            Some((MOCK_USER_ID, MOCK_EMAIL))
        ) && !self.blacklist.contains(token)
    }

    fn owned_task(&self, task_id: u64, user_id: u64) -> Result<StoredTask, Status> {
        match self.tasks.get(&task_id) {
            Some(task) if task.owner == user_id => Ok(task.clone()),
            _ => Err(Status::not_found("task not found")),
        }
    }
}

#[async_trait]
impl TodoRpc for MockBackend {
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse, Status> {
        self.ensure_up()?;
        if req.email == MOCK_EMAIL && req.password == MOCK_PASSWORD {
            return Ok(LoginResponse {
                token: Self::token(),
            });
        }
        Err(Status::permission_denied("Username or password incorrect"))
    }

    async fn logout(&self, req: LogoutRequest) -> Result<LogoutResponse, Status> {
        self.ensure_up()?;
        if Self::decode_token(&req.token).is_none() {
            return Err(Status::failed_precondition("Bad token"));
        }
        if self.is_valid_session(&req.token) {
            self.blacklist.insert(req.token);
            return Ok(LogoutResponse { success: true });
        }
        Err(Status::unauthenticated("User not found"))
    }

    async fn check_secret(&self, req: CheckSecretRequest) -> Result<CheckSecretResponse, Status> {
        self.ensure_up()?;
        if Self::decode_token(&req.secret).is_none() {
            return Err(Status::invalid_argument("Bad token"));
        }
        if self.is_valid_session(&req.secret) {
            return Ok(CheckSecretResponse {
                user_id: MOCK_USER_ID,
                email: MOCK_EMAIL.to_string(),
            });
        }
        Err(Status::unauthenticated("Permission denied"))
    }

    async fn create_task(&self, req: CreateTaskRequest) -> Result<CreateTaskResponse, Status> {
        self.ensure_up()?;
        let task_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.tasks.insert(
            task_id,
            StoredTask {
                owner: req.user_id,
                title: req.title,
                is_done: false,
            },
        );
        Ok(CreateTaskResponse { task_id })
    }

    async fn list_tasks(&self, req: ListTasksRequest) -> Result<ListTasksResponse, Status> {
        self.ensure_up()?;
        let mut tasks: Vec<TaskItem> = self
            .tasks
            .iter()
            .filter(|entry| entry.value().owner == req.user_id)
            .map(|entry| TaskItem {
                task_id: *entry.key(),
                title: entry.value().title.clone(),
                is_done: entry.value().is_done,
            })
            .collect();
        tasks.sort_by_key(|t| t.task_id);
        Ok(ListTasksResponse { tasks })
    }

    async fn get_task_by_id(&self, req: TaskByIdRequest) -> Result<GetTaskByIdResponse, Status> {
        self.ensure_up()?;
        let task = self.owned_task(req.task_id, req.user_id)?;
        Ok(GetTaskByIdResponse {
            title: task.title,
            is_done: task.is_done,
        })
    }

    async fn update_task_by_id(
        &self,
        req: UpdateTaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        self.ensure_up()?;
        self.owned_task(req.task_id, req.user_id)?;
        if let Some(mut task) = self.tasks.get_mut(&req.task_id) {
            if let Some(title) = req.title {
                task.title = title;
            }
            if let Some(is_done) = req.is_done {
                task.is_done = is_done;
            }
        }
        Ok(ChangedTaskByIdResponse { success: true })
    }

    async fn delete_task_by_id(
        &self,
        req: TaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        self.ensure_up()?;
        self.owned_task(req.task_id, req.user_id)?;
        self.tasks.remove(&req.task_id);
        Ok(ChangedTaskByIdResponse { success: true })
    }
}
