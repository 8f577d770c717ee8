//! HTTP handlers.
//!
//! Handlers turn path params and bodies into backend calls and backend
//! results into envelope responses. They run inside the request future, so a
//! client disconnect or the gateway timeout drops the in-flight backend call.

pub mod auth;
pub mod tasks;
