//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, credential extraction)
//!     → middleware/auth.rs (bearer check on protected routes)
//!     → handlers/ (backend calls)
//!     → response.rs (envelope, status code)
//!     → Send to client
//! ```

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
