//! HTTP gateway for a gRPC task-list backend.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──HTTP/JSON──▶ ┌──────────────────────────────────────────────┐
//!                         │ http::server (axum router, /api/v1)          │
//!                         │   request id · trace · timeout · metrics     │
//!                         │        │                                     │
//!                         │        ▼                                     │
//!                         │ http::middleware::auth (Bearer → CheckSecret)│
//!                         │        │                                     │
//!                         │        ▼                                     │
//!                         │ http::handlers (login/logout, tasks CRUD)    │
//!                         │        │                                     │
//!                         │        ▼                                     │
//!                         │ backend::Backend (status → error mapping)    │
//!                         │        │                                     │
//!                         │        ▼                                     │
//!                         │ backend::TodoRpc (tonic channel | mock)      │
//!                         └────────┼─────────────────────────────────────┘
//!                                  ▼
//!                          todo.v1.ToDoService (gRPC)
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;

pub use backend::{Backend, BackendError, MockBackend};
pub use config::GatewayConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
