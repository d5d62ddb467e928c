//! Run configuration resolved from CI environment variables.
//!
//! Every input arrives as a named environment variable; absence of an
//! optional variable simply omits the corresponding behavior. The only
//! validation done here is the kind that must fail the run before anything
//! executes: deployment type whitelist, parameter-list shape, and numeric
//! poll-window parsing.

use crate::error::{Error, Result};

const ENV_CLI_PROGRAM: &str = "SHIPWATCH_CLI";
const ENV_DEPLOY_TYPE: &str = "DEPLOY_TYPE";
const ENV_MODEL_ID: &str = "MODEL_ID";
const ENV_BUILD_ID: &str = "BUILD_ID";
const ENV_TAGS: &str = "TAGS";
const ENV_PARAM_LIST: &str = "PARAM_LIST";
const ENV_ENV_VARS: &str = "ENV_VARS";
const ENV_INSTANCE: &str = "INSTANCE";
const ENV_REPLICAS: &str = "REPLICAS";
const ENV_IAM_ROLE_ARN: &str = "IAM_ROLE_ARN";
const ENV_ENVIRONMENT: &str = "ENVIRONMENT";
const ENV_DEPLOY_TIMEOUT: &str = "TIMEOUT_AFTER";
const ENV_POLL_TIMEOUT: &str = "INPUT_TIMEOUT_AFTER";
const ENV_REPORT_PATH: &str = "GITHUB_ENV";
const ENV_API_URL: &str = "PLATFORM_API_URL";
const ENV_API_TOKEN: &str = "PLATFORM_API_TOKEN";

const DEFAULT_CLI_PROGRAM: &str = "qwak";
const DEFAULT_POLL_TIMEOUT_MINUTES: u64 = 30;

pub const VALID_DEPLOY_TYPES: [&str; 3] = ["realtime", "batch", "stream"];

#[derive(Debug, Clone, Default)]
pub struct DeployConfig {
    pub cli_program: String,
    pub deploy_type: Option<String>,
    pub model_id: Option<String>,
    pub build_id: Option<String>,
    pub tags: Vec<String>,
    pub params: Vec<(String, String)>,
    pub env_vars: Vec<String>,
    pub instance: Option<String>,
    pub replicas: Option<String>,
    pub iam_role_arn: Option<String>,
    pub environment: Option<String>,
    /// Forwarded to the deployment CLI as `--timeout` (realtime only).
    pub deploy_timeout: Option<String>,
    /// Wall-clock budget for the status poll loop, in minutes.
    pub poll_timeout_minutes: u64,
    pub report_path: Option<String>,
    pub api_base_url: Option<String>,
    pub api_token: Option<String>,
}

impl DeployConfig {
    pub fn from_env() -> Result<Self> {
        let deploy_type = env_opt(ENV_DEPLOY_TYPE);
        if let Some(ref value) = deploy_type {
            validate_deploy_type(value)?;
        }

        let params = match env_opt(ENV_PARAM_LIST) {
            Some(raw) => parse_param_list(&raw)?,
            None => Vec::new(),
        };

        Ok(Self {
            cli_program: env_opt(ENV_CLI_PROGRAM)
                .unwrap_or_else(|| DEFAULT_CLI_PROGRAM.to_string()),
            deploy_type,
            model_id: env_opt(ENV_MODEL_ID),
            build_id: env_opt(ENV_BUILD_ID),
            tags: env_opt(ENV_TAGS).map(|raw| parse_list(&raw)).unwrap_or_default(),
            params,
            env_vars: env_opt(ENV_ENV_VARS)
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
            instance: env_opt(ENV_INSTANCE),
            replicas: env_opt(ENV_REPLICAS),
            iam_role_arn: env_opt(ENV_IAM_ROLE_ARN),
            environment: env_opt(ENV_ENVIRONMENT),
            deploy_timeout: env_opt(ENV_DEPLOY_TIMEOUT),
            poll_timeout_minutes: parse_poll_timeout(env_opt(ENV_POLL_TIMEOUT))?,
            report_path: env_opt(ENV_REPORT_PATH),
            api_base_url: env_opt(ENV_API_URL),
            api_token: env_opt(ENV_API_TOKEN),
        })
    }

    pub fn require_model_id(&self) -> Result<&str> {
        self.model_id
            .as_deref()
            .ok_or_else(|| Error::config_missing_key(ENV_MODEL_ID))
    }

    pub fn require_report_path(&self) -> Result<&str> {
        self.report_path.as_deref().ok_or_else(|| {
            Error::config_missing_key(ENV_REPORT_PATH)
                .with_hint("GitHub Actions sets GITHUB_ENV automatically; set it manually elsewhere")
        })
    }
}

fn env_opt(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

pub fn validate_deploy_type(value: &str) -> Result<()> {
    if VALID_DEPLOY_TYPES.contains(&value) {
        Ok(())
    } else {
        Err(Error::config_invalid_value(
            ENV_DEPLOY_TYPE,
            Some(value.to_string()),
            format!("must be one of {}", VALID_DEPLOY_TYPES.join(", ")),
        ))
    }
}

/// Parse a comma-separated `key=value` list into ordered pairs.
///
/// Entry order is preserved since it determines flag order on the command
/// line. An entry without `=` fails the whole run.
pub fn parse_param_list(raw: &str) -> Result<Vec<(String, String)>> {
    let mut params = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            Error::config_invalid_value(
                ENV_PARAM_LIST,
                Some(entry.to_string()),
                "expected key=value",
            )
        })?;
        params.push((key.trim().to_string(), value.trim().to_string()));
    }
    Ok(params)
}

/// Split a comma-separated list into trimmed, non-empty tokens.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_poll_timeout(raw: Option<String>) -> Result<u64> {
    match raw {
        Some(value) => value.parse::<u64>().map_err(|_| {
            Error::config_invalid_value(
                ENV_POLL_TIMEOUT,
                Some(value.clone()),
                "expected a whole number of minutes",
            )
        }),
        None => Ok(DEFAULT_POLL_TIMEOUT_MINUTES),
    }
}
