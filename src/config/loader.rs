//! Configuration loading from disk and environment.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_PREFIX: &str = "TODO_GATEWAY_";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {key}")]
    Env { key: String, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, override from the process environment, and validate.
///
/// A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let mut config = read_file(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(GatewayConfig::default())
        }
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// Apply `TODO_GATEWAY_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| {
        let key = format!("{}{}", ENV_PREFIX, name);
        lookup(&key).map(|value| (key, value))
    };

    if let Some((key, value)) = var("ENV_MODE") {
        config.env_mode = value.parse().map_err(|_| ConfigError::Env { key, value })?;
    }
    if let Some((_, value)) = var("API_HOSTNAME") {
        config.api.hostname = value;
    }
    if let Some((key, value)) = var("API_PORT") {
        config.api.port = value.parse().map_err(|_| ConfigError::Env { key, value })?;
    }
    if let Some((_, value)) = var("BACKEND_HOSTNAME") {
        config.backend.hostname = value;
    }
    if let Some((key, value)) = var("BACKEND_PORT") {
        config.backend.port = value.parse().map_err(|_| ConfigError::Env { key, value })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvMode;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.backend.port, 9090);
        assert_eq!(config.env_mode, EnvMode::Prod);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
env_mode = "dev"

[api]
port = 8000

[backend]
hostname = "todo-backend"
"#
        )
        .unwrap();

        let config = read_file(file.path()).unwrap();
        assert_eq!(config.env_mode, EnvMode::Dev);
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.api.hostname, "localhost");
        assert_eq!(config.backend.hostname, "todo-backend");
        assert_eq!(config.backend.port, 9090);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();
        assert!(matches!(read_file(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn api_and_backend_ports_use_distinct_keys() {
        let mut config = GatewayConfig::default();
        apply_env_overrides(
            &mut config,
            lookup(&[
                ("TODO_GATEWAY_API_PORT", "8081"),
                ("TODO_GATEWAY_BACKEND_PORT", "50051"),
                ("TODO_GATEWAY_ENV_MODE", "LOCAL"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api.port, 8081);
        assert_eq!(config.backend.port, 50051);
        assert_eq!(config.env_mode, EnvMode::Local);
    }

    #[test]
    fn unparsable_override_names_the_key() {
        let mut config = GatewayConfig::default();
        let err = apply_env_overrides(&mut config, lookup(&[("TODO_GATEWAY_API_PORT", "http")]))
            .unwrap_err();
        match err {
            ConfigError::Env { key, value } => {
                assert_eq!(key, "TODO_GATEWAY_API_PORT");
                assert_eq!(value, "http");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
