//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (TOML file, if present)
//!     → loader.rs (TODO_GATEWAY_* environment overrides)
//!     → validation.rs (semantic checks, all errors at once)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Loaded once at startup; never reloaded
//! - All fields have defaults so an absent file is a valid setup
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ApiConfig, BackendConfig, EnvMode, GatewayConfig, ObservabilityConfig, TimeoutConfig,
};
