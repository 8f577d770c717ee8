//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use todo_gateway::backend::mock::{MOCK_EMAIL, MOCK_PASSWORD, MOCK_USER_ID};
use todo_gateway::backend::proto::{
    ChangedTaskByIdResponse, CheckSecretRequest, CheckSecretResponse, CreateTaskRequest,
    CreateTaskResponse, GetTaskByIdResponse, ListTasksRequest, ListTasksResponse, LoginRequest,
    LoginResponse, LogoutRequest, LogoutResponse, TaskByIdRequest, UpdateTaskByIdRequest,
};
use todo_gateway::backend::TodoRpc;
use todo_gateway::http::{build_router, AppState};
use todo_gateway::{Backend, GatewayConfig, MockBackend};
use tokio::sync::Notify;
use tonic::Status;
use tower::ServiceExt;

/// Router over a fresh reference backend.
pub fn test_app() -> Router {
    app_with(MockBackend::new())
}

pub fn app_with(mock: MockBackend) -> Router {
    app_over(Arc::new(mock), &GatewayConfig::default())
}

pub fn app_over(rpc: Arc<dyn TodoRpc>, config: &GatewayConfig) -> Router {
    build_router(config, AppState::new(Backend::new(rpc)))
}

fn accepted_secret() -> Result<CheckSecretResponse, Status> {
    Ok(CheckSecretResponse {
        user_id: MOCK_USER_ID,
        email: MOCK_EMAIL.to_string(),
    })
}

fn unreachable_backend<T>() -> Result<T, Status> {
    Err(Status::unavailable("connection refused"))
}

/// Accepts every bearer token; every other call fails as unreachable.
#[derive(Debug, Default)]
pub struct DegradedBackend;

#[async_trait]
impl TodoRpc for DegradedBackend {
    async fn login(&self, _: LoginRequest) -> Result<LoginResponse, Status> {
        unreachable_backend()
    }

    async fn logout(&self, _: LogoutRequest) -> Result<LogoutResponse, Status> {
        unreachable_backend()
    }

    async fn check_secret(&self, _: CheckSecretRequest) -> Result<CheckSecretResponse, Status> {
        accepted_secret()
    }

    async fn create_task(&self, _: CreateTaskRequest) -> Result<CreateTaskResponse, Status> {
        unreachable_backend()
    }

    async fn list_tasks(&self, _: ListTasksRequest) -> Result<ListTasksResponse, Status> {
        unreachable_backend()
    }

    async fn get_task_by_id(&self, _: TaskByIdRequest) -> Result<GetTaskByIdResponse, Status> {
        unreachable_backend()
    }

    async fn update_task_by_id(
        &self,
        _: UpdateTaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        unreachable_backend()
    }

    async fn delete_task_by_id(
        &self,
        _: TaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        unreachable_backend()
    }
}

/// Sets the flag when dropped.
struct DropFlag<'a>(&'a AtomicBool);

impl Drop for DropFlag<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Accepts every bearer token; `list_tasks` never answers.
///
/// `started` fires once a listing is in flight and `cancelled` is set when
/// the pending call is dropped.
#[derive(Debug, Default)]
pub struct StalledBackend {
    pub started: Notify,
    pub cancelled: AtomicBool,
}

impl StalledBackend {
    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TodoRpc for StalledBackend {
    async fn login(&self, _: LoginRequest) -> Result<LoginResponse, Status> {
        unreachable_backend()
    }

    async fn logout(&self, _: LogoutRequest) -> Result<LogoutResponse, Status> {
        unreachable_backend()
    }

    async fn check_secret(&self, _: CheckSecretRequest) -> Result<CheckSecretResponse, Status> {
        accepted_secret()
    }

    async fn create_task(&self, _: CreateTaskRequest) -> Result<CreateTaskResponse, Status> {
        unreachable_backend()
    }

    async fn list_tasks(&self, _: ListTasksRequest) -> Result<ListTasksResponse, Status> {
        let _flag = DropFlag(&self.cancelled);
        self.started.notify_one();
        std::future::pending::<()>().await;
        unreachable_backend()
    }

    async fn get_task_by_id(&self, _: TaskByIdRequest) -> Result<GetTaskByIdResponse, Status> {
        unreachable_backend()
    }

    async fn update_task_by_id(
        &self,
        _: UpdateTaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        unreachable_backend()
    }

    async fn delete_task_by_id(
        &self,
        _: TaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        unreachable_backend()
    }
}

pub fn basic_auth(email: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", email, password)))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in as the reference user and return the bearer token.
pub async fn login(app: &Router) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/login")
        .header(header::AUTHORIZATION, basic_auth(MOCK_EMAIL, MOCK_PASSWORD))
        .body(Body::empty())
        .unwrap();
    let body = body_json(send(app, request).await).await;
    body["token"].as_str().unwrap().to_string()
}

/// Authenticated request with an optional JSON body.
pub fn authed(method: &str, uri: &str, token: &str, body: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
