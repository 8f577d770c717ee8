//! RPC capability seam between the adapter and the wire.
//!
//! `TodoRpc` mirrors the backend service one method per RPC. The tonic
//! transport implements it for production; `MockBackend` implements it for
//! tests and local runs.

use async_trait::async_trait;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};

use super::proto::{
    ChangedTaskByIdResponse, CheckSecretRequest, CheckSecretResponse, CreateTaskRequest,
    CreateTaskResponse, GetTaskByIdResponse, ListTasksRequest, ListTasksResponse, LoginRequest,
    LoginResponse, LogoutRequest, LogoutResponse, TaskByIdRequest, ToDoServiceClient,
    UpdateTaskByIdRequest,
};

/// The backend service as a set of request/response calls.
#[async_trait]
pub trait TodoRpc: Send + Sync {
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse, Status>;
    async fn logout(&self, req: LogoutRequest) -> Result<LogoutResponse, Status>;
    async fn check_secret(&self, req: CheckSecretRequest) -> Result<CheckSecretResponse, Status>;
    async fn create_task(&self, req: CreateTaskRequest) -> Result<CreateTaskResponse, Status>;
    async fn list_tasks(&self, req: ListTasksRequest) -> Result<ListTasksResponse, Status>;
    async fn get_task_by_id(&self, req: TaskByIdRequest) -> Result<GetTaskByIdResponse, Status>;
    async fn update_task_by_id(
        &self,
        req: UpdateTaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status>;
    async fn delete_task_by_id(
        &self,
        req: TaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status>;
}

/// tonic transport for [`TodoRpc`].
///
/// Every call carries a `grpc-timeout` deadline. Dropping the returned
/// future (client disconnect, gateway timeout) cancels the call.
#[derive(Debug, Clone)]
pub struct GrpcTransport {
    client: ToDoServiceClient<Channel>,
    request_timeout: Duration,
}

impl GrpcTransport {
    /// Build a lazily-connected transport for `http://host:port`.
    ///
    /// Only an invalid endpoint fails here; an unreachable backend surfaces
    /// as `Unavailable` on the first call.
    pub fn connect_lazy(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, tonic::transport::Error> {
        let endpoint = Endpoint::from_shared(format!("http://{}:{}", host, port))?
            .connect_timeout(connect_timeout);
        Ok(Self::from_channel(endpoint.connect_lazy(), request_timeout))
    }

    pub fn from_channel(channel: Channel, request_timeout: Duration) -> Self {
        Self {
            client: ToDoServiceClient::new(channel),
            request_timeout,
        }
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.request_timeout);
        request
    }
}

#[async_trait]
impl TodoRpc for GrpcTransport {
    async fn login(&self, req: LoginRequest) -> Result<LoginResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.login(self.request(req)).await?.into_inner())
    }

    async fn logout(&self, req: LogoutRequest) -> Result<LogoutResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.logout(self.request(req)).await?.into_inner())
    }

    async fn check_secret(&self, req: CheckSecretRequest) -> Result<CheckSecretResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.check_secret(self.request(req)).await?.into_inner())
    }

    async fn create_task(&self, req: CreateTaskRequest) -> Result<CreateTaskResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.create_task(self.request(req)).await?.into_inner())
    }

    async fn list_tasks(&self, req: ListTasksRequest) -> Result<ListTasksResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.list_tasks(self.request(req)).await?.into_inner())
    }

    async fn get_task_by_id(&self, req: TaskByIdRequest) -> Result<GetTaskByIdResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.get_task_by_id(self.request(req)).await?.into_inner())
    }

    async fn update_task_by_id(
        &self,
        req: UpdateTaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.update_task_by_id(self.request(req)).await?.into_inner())
    }

    async fn delete_task_by_id(
        &self,
        req: TaskByIdRequest,
    ) -> Result<ChangedTaskByIdResponse, Status> {
        let mut client = self.client.clone();
        Ok(client.delete_task_by_id(self.request(req)).await?.into_inner())
    }
}
