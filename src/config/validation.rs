//! Configuration validation.
//!
//! Semantic checks that serde cannot express. All errors are collected,
//! not just the first.

use std::fmt;
use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::ServerConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration: ServerConfig → Result<(), Vec<ValidationError>>.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::new("listener.port", "must be greater than 0"));
    }
    if config.listener.bind_address().parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.host",
            format!("{:?} is not a valid IP address", config.listener.host),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.cors.enabled && !config.cors.is_wide_open() {
        for origin in &config.cors.allowed_origins {
            if HeaderValue::from_str(origin).is_err() {
                errors.push(ValidationError::new(
                    "cors.allowed_origins",
                    format!("{origin:?} is not a valid origin"),
                ));
            }
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
