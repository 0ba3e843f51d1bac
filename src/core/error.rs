use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

const NOT_FOUND_MESSAGE: &str = "No officials found";
const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    MissingParameter(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::MissingParameter(format!("Missing {name} parameter"))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Configuration(_) | Self::Upstream(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text shown to the caller. Only the missing-parameter reason is echoed back.
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingParameter(reason) => reason.clone(),
            Self::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
            Self::Configuration(_) | Self::Upstream(_) | Self::Internal(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (status, self.public_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_echoes_reason() {
        let error = AppError::missing_parameter("zipCode");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.public_message(), "Missing zipCode parameter");
    }

    #[test]
    fn upstream_failures_hide_their_cause() {
        let error = AppError::upstream("civic lookup returned 503 Service Unavailable");
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "An error occurred");
    }

    #[test]
    fn not_found_uses_fixed_message() {
        let error = AppError::not_found("no officials for 00000");
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.public_message(), "No officials found");
    }
}
