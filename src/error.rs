//! Error types for the VitaCare CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for VitaCare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session rejected by the server. Run `vitacare login` to sign in again.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Page scan of {resource} stopped after {pages} pages; more pages remain")]
    ScanLimitExceeded { resource: String, pages: usize },

    #[error("Operation cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Authentication and session errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect credentials")]
    IncorrectCredentials,

    #[error("The server returned an invalid session token")]
    InvalidToken,

    #[error("Not signed in. Run `vitacare login`, then resume with `{return_to}`.")]
    LoginRequired { return_to: String },

    #[error("You don't have permission to {action}.")]
    PermissionDenied { action: String },
}

/// Form validation errors, one entry per offending field
#[derive(Debug, Error)]
#[error("Invalid input: {}", join_field_errors(.0))]
pub struct ValidationError(pub Vec<FieldError>);

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single field validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `vitacare init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("vitacare login"));
    }

    #[test]
    fn test_api_error_forbidden_message() {
        let err = ApiError::Forbidden;
        assert!(err.to_string().contains("permission"));
    }

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("Paciente 42".to_string());
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_api_error_rate_limit() {
        let err = ApiError::RateLimit(Duration::from_secs(30));
        let msg = err.to_string();
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_api_error_scan_limit() {
        let err = ApiError::ScanLimitExceeded {
            resource: "pacientes".to_string(),
            pages: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("pacientes"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_auth_error_login_required_mentions_resume() {
        let err = AuthError::LoginRequired {
            return_to: "vitacare patient list".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("vitacare login"));
        assert!(msg.contains("vitacare patient list"));
    }

    #[test]
    fn test_auth_error_permission_denied() {
        let err = AuthError::PermissionDenied {
            action: "delete doctors".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "You don't have permission to delete doctors."
        );
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError(vec![
            FieldError::new("cedula", "must be exactly 10 digits"),
            FieldError::new("telefono", "is required"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("cedula: must be exactly 10 digits"));
        assert!(msg.contains("telefono: is required"));
    }

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound;
        assert!(err.to_string().contains("vitacare init"));
    }

    #[test]
    fn test_error_from_api_error() {
        let api_err = ApiError::Unauthorized;
        let err: Error = api_err.into();

        match err {
            Error::Api(ApiError::Unauthorized) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }

    #[test]
    fn test_error_from_auth_error() {
        let err: Error = AuthError::IncorrectCredentials.into();
        assert_eq!(err.to_string(), "Incorrect credentials");
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
