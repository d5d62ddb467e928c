//! Remote platform API client.
//!
//! Read-only queries against the ML platform: deployment status by id and
//! build listings by model + tags. The `PlatformApi` trait is the seam that
//! lets the poller and build resolver run against a scripted client in tests.

use crate::config::DeployConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentStatusResponse {
    pub status: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRecord {
    pub build_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct BuildListResponse {
    builds: Vec<BuildRecord>,
}

pub trait PlatformApi {
    /// Current status of a deployment, keyed by the id scraped from CLI output.
    fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatusResponse>;

    /// Builds of a model carrying all of the given tags.
    fn list_builds(&self, model_id: &str, tags: &[String]) -> Result<Vec<BuildRecord>>;
}

/// HTTP implementation against the platform's management API.
pub struct HttpPlatformClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpPlatformClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    pub fn from_config(config: &DeployConfig) -> Result<Self> {
        let base_url = config
            .api_base_url
            .as_deref()
            .ok_or_else(|| Error::config_missing_key("PLATFORM_API_URL"))?;
        Ok(Self::new(
            base_url.trim_end_matches('/'),
            config.api_token.clone(),
        ))
    }

    fn get(&self, endpoint: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.get(&url);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| Error::api_request_failed(e.to_string()))?;
        parse_json_response(response)
    }
}

impl PlatformApi for HttpPlatformClient {
    fn deployment_status(&self, deployment_id: &str) -> Result<DeploymentStatusResponse> {
        let body = self.get(&format!(
            "/api/v1/deployments/{}/status",
            deployment_id
        ))?;
        serde_json::from_value(body).map_err(|e| Error::api_response_invalid(e.to_string()))
    }

    fn list_builds(&self, model_id: &str, tags: &[String]) -> Result<Vec<BuildRecord>> {
        let mut endpoint = format!("/api/v1/models/{}/builds", model_id);
        if !tags.is_empty() {
            endpoint.push_str(&format!("?tags={}", tags.join(",")));
        }
        let body = self.get(&endpoint)?;
        let parsed: BuildListResponse =
            serde_json::from_value(body).map_err(|e| Error::api_response_invalid(e.to_string()))?;
        Ok(parsed.builds)
    }
}

fn parse_json_response(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| Error::api_request_failed(e.to_string()))?;

    if !status.is_success() {
        return Err(Error::api_error(status.as_u16(), body));
    }

    serde_json::from_str(&body).map_err(|e| Error::api_response_invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_deserializes_from_wire_shape() {
        let parsed: DeploymentStatusResponse =
            serde_json::from_str(r#"{"status": 3}"#).unwrap();
        assert_eq!(parsed.status, 3);
    }

    #[test]
    fn build_record_deserializes_camel_case_fields() {
        let parsed: BuildRecord = serde_json::from_str(
            r#"{"buildId": "b-1", "status": "SUCCESSFUL", "createdAt": "2024-05-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(parsed.build_id, "b-1");
        assert_eq!(parsed.status, "SUCCESSFUL");
        assert_eq!(parsed.created_at.timestamp(), 1714564800);
    }

    #[test]
    fn build_list_unwraps_envelope() {
        let parsed: BuildListResponse = serde_json::from_str(
            r#"{"builds": [{"buildId": "b-1", "status": "FAILED", "createdAt": "2024-05-01T12:00:00Z"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.builds.len(), 1);
    }

    #[test]
    fn from_config_requires_base_url() {
        let config = DeployConfig::default();
        assert!(HttpPlatformClient::from_config(&config).is_err());
    }
}
