use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigMissingKey,
    ConfigInvalidValue,

    DeployCommandFailed,
    DeployIdNotFound,

    BuildNotFound,

    ApiRequestFailed,
    ApiResponseInvalid,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigMissingKey => "config.missing_key",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::DeployCommandFailed => "deploy.command_failed",
            ErrorCode::DeployIdNotFound => "deploy.id_not_found",

            ErrorCode::BuildNotFound => "build.not_found",

            ErrorCode::ApiRequestFailed => "api.request_failed",
            ErrorCode::ApiResponseInvalid => "api.response_invalid",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMissingKeyDetails {
    pub key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployCommandFailedDetails {
    pub command: String,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildNotFoundDetails {
    pub model_id: String,
    pub tags: Vec<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
    pub retryable: Option<bool>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
            retryable: None,
        }
    }

    pub fn config_missing_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let details = serde_json::to_value(ConfigMissingKeyDetails { key: key.clone() })
            .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(
            ErrorCode::ConfigMissingKey,
            format!("Missing required configuration: {}", key),
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let problem = problem.into();
        let details = serde_json::to_value(ConfigInvalidValueDetails {
            key: key.clone(),
            value,
            problem: problem.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value for {}: {}", key, problem),
            details,
        )
    }

    pub fn deploy_command_failed(details: DeployCommandFailedDetails) -> Self {
        let message = format!(
            "Deployment command exited with status {}",
            details.exit_code
        );
        let details =
            serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
        Self::new(ErrorCode::DeployCommandFailed, message, details)
    }

    pub fn deploy_id_not_found() -> Self {
        Self::new(
            ErrorCode::DeployIdNotFound,
            "Deployment ID not found in the command output",
            Value::Object(serde_json::Map::new()),
        )
        .with_hint("Contact the platform team if the CLI output format changed")
    }

    pub fn build_not_found(
        model_id: impl Into<String>,
        tags: Vec<String>,
        problem: impl Into<String>,
    ) -> Self {
        let problem = problem.into();
        let details = serde_json::to_value(BuildNotFoundDetails {
            model_id: model_id.into(),
            tags,
            problem: problem.clone(),
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(
            ErrorCode::BuildNotFound,
            format!("No usable build found: {}", problem),
            details,
        )
    }

    pub fn api_request_failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::ApiRequestFailed,
            format!("API request failed: {}", error),
            serde_json::json!({ "error": error }),
        )
    }

    pub fn api_error(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(
            ErrorCode::ApiRequestFailed,
            format!("API error: HTTP {}", status),
            serde_json::json!({ "status": status, "body": body }),
        )
    }

    pub fn api_response_invalid(error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            ErrorCode::ApiResponseInvalid,
            format!("Invalid API response: {}", error),
            serde_json::json!({ "error": error }),
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::to_value(InternalIoErrorDetails {
            error: error.into(),
            context,
        })
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = serde_json::json!({
            "error": error.into(),
            "context": context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
