//! End-to-end deployment orchestration.
//!
//! The pipeline stitches together the independent pieces: optional build
//! resolution from tags, command construction and execution, identifier
//! scraping, status polling, and result reporting. Each stage is fallible
//! on its own terms; the pipeline only sequences them and decides what the
//! final record looks like.

use std::path::Path;

use serde::Serialize;

use crate::client::PlatformApi;
use crate::config::DeployConfig;
use crate::error::{DeployCommandFailedDetails, Error, Result};
use crate::poller::{PollOptions, PollOutcome};
use crate::utils::process;
use crate::{builds, command, poller, report, scrape};

/// Final record of a pipeline run, also the JSON payload for `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_id: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<u64>,
    pub status_history: Vec<String>,
    /// Whether the result was appended to the CI environment file.
    pub reported: bool,
}

/// Render the command that would run, without executing anything.
pub fn dry_run(config: &DeployConfig) -> RunReport {
    let cmd = command::build(config);
    eprintln!("[deploy] dry run; would execute: {}", cmd.render());

    if config.build_id.is_none() && !config.tags.is_empty() {
        eprintln!(
            "[deploy] build id would be resolved from tags [{}] at run time",
            config.tags.join(", ")
        );
    }

    RunReport {
        command: Some(cmd.render()),
        deployment_id: None,
        build_id: config.build_id.clone(),
        status: "DRY_RUN".to_string(),
        elapsed_seconds: None,
        status_history: Vec::new(),
        reported: false,
    }
}

/// Trigger a deployment and follow it to a terminal state.
///
/// When no build id is configured but tags are, the latest successful
/// tagged build is resolved first. The deployment command's non-zero exit
/// is fatal; a deployment that reaches a failure state or times out is a
/// reported outcome instead.
pub fn run(config: &DeployConfig, api: &dyn PlatformApi) -> Result<RunReport> {
    let mut config = config.clone();

    if config.build_id.is_none() && !config.tags.is_empty() {
        let model_id = config.require_model_id()?;
        let selected = builds::resolve_latest_successful(api, model_id, &config.tags)?;
        eprintln!(
            "[deploy] resolved build {} from tags [{}]",
            selected.build_id,
            config.tags.join(", ")
        );
        config.build_id = Some(selected.build_id);
    }

    let cmd = command::build(&config);
    eprintln!("[deploy] executing: {}", cmd.render());

    let output = process::run_captured(&cmd.program, &cmd.args, "deployment command")?;
    eprintln!("[deploy] command output:\n{}", output.stdout);

    if !output.success {
        eprintln!("[deploy] command failed: {}", output.error_text());
        return Err(Error::deploy_command_failed(DeployCommandFailedDetails {
            command: cmd.render(),
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
        }));
    }

    let ids = scrape::scrape_ids(&output.stdout)?;
    eprintln!(
        "[deploy] deployment id {}, build id {}",
        ids.deployment_id,
        ids.build_id.as_deref().unwrap_or("(not found)")
    );

    let opts = PollOptions::from_minutes(config.poll_timeout_minutes);
    finish(
        &config,
        api,
        Some(cmd.render()),
        ids.build_id,
        ids.deployment_id,
        &opts,
    )
}

/// Follow an already-triggered deployment to a terminal state.
pub fn wait(
    config: &DeployConfig,
    api: &dyn PlatformApi,
    deployment_id: &str,
) -> Result<RunReport> {
    let opts = PollOptions::from_minutes(config.poll_timeout_minutes);
    wait_with_options(config, api, deployment_id, &opts)
}

pub fn wait_with_options(
    config: &DeployConfig,
    api: &dyn PlatformApi,
    deployment_id: &str,
    opts: &PollOptions,
) -> Result<RunReport> {
    finish(config, api, None, None, deployment_id.to_string(), opts)
}

fn finish(
    config: &DeployConfig,
    api: &dyn PlatformApi,
    command: Option<String>,
    build_id: Option<String>,
    deployment_id: String,
    opts: &PollOptions,
) -> Result<RunReport> {
    let poll = poller::wait_for_deployment(api, &deployment_id, opts)?;
    let status = poll.outcome.status_label().to_string();

    if let PollOutcome::Timeout { .. } = poll.outcome {
        eprintln!(
            "[deploy] recording TIMEOUT for deployment {}; it may still complete on the platform",
            deployment_id
        );
    }

    let path = config.require_report_path()?;
    report::append_result(Path::new(path), &deployment_id, &status)?;

    let elapsed_seconds = match poll.outcome {
        PollOutcome::Success { elapsed, .. } => Some(elapsed.as_secs()),
        _ => None,
    };

    Ok(RunReport {
        command,
        deployment_id: Some(deployment_id),
        build_id,
        status,
        elapsed_seconds,
        status_history: poll
            .transitions
            .iter()
            .map(|s| s.name().to_string())
            .collect(),
        reported: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{BuildRecord, DeploymentStatusResponse};
    use std::cell::RefCell;
    use std::time::Duration;

    struct ScriptedStatuses {
        codes: RefCell<Vec<i64>>,
    }

    impl ScriptedStatuses {
        fn new(codes: &[i64]) -> Self {
            Self {
                codes: RefCell::new(codes.to_vec()),
            }
        }
    }

    impl PlatformApi for ScriptedStatuses {
        fn deployment_status(&self, _deployment_id: &str) -> Result<DeploymentStatusResponse> {
            let mut codes = self.codes.borrow_mut();
            let code = if codes.len() > 1 { codes.remove(0) } else { codes[0] };
            Ok(DeploymentStatusResponse { status: code })
        }

        fn list_builds(&self, _model_id: &str, _tags: &[String]) -> Result<Vec<BuildRecord>> {
            Ok(Vec::new())
        }
    }

    fn fast_opts(timeout_ms: u64) -> PollOptions {
        PollOptions {
            interval: Duration::from_millis(1),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    fn config_with_report_path(path: &std::path::Path) -> DeployConfig {
        DeployConfig {
            cli_program: "qwak".to_string(),
            report_path: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn successful_wait_reports_final_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        let config = config_with_report_path(&path);
        let api = ScriptedStatuses::new(&[1, 2, 3]);

        let report = wait_with_options(&config, &api, "dep-1", &fast_opts(5_000)).unwrap();

        assert_eq!(report.status, "SUCCESSFUL_DEPLOYMENT");
        assert!(report.reported);
        assert!(report.elapsed_seconds.is_some());
        assert_eq!(
            report.status_history,
            vec![
                "INITIATING_DEPLOYMENT",
                "PENDING_DEPLOYMENT",
                "SUCCESSFUL_DEPLOYMENT"
            ]
        );

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "deploy-id=dep-1\ndeploy-status=SUCCESSFUL_DEPLOYMENT\n"
        );
    }

    #[test]
    fn failure_terminal_is_reported_not_errored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        let config = config_with_report_path(&path);
        let api = ScriptedStatuses::new(&[2, 4]);

        let report = wait_with_options(&config, &api, "dep-1", &fast_opts(60_000)).unwrap();

        assert_eq!(report.status, "FAILED_DEPLOYMENT");
        assert!(report.elapsed_seconds.is_none());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("deploy-status=FAILED_DEPLOYMENT"));
    }

    #[test]
    fn timeout_writes_literal_timeout_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("github_env");
        let config = config_with_report_path(&path);
        let api = ScriptedStatuses::new(&[2]);

        let report = wait_with_options(&config, &api, "dep-1", &fast_opts(30)).unwrap();

        assert_eq!(report.status, "TIMEOUT");
        assert!(report.reported);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "deploy-id=dep-1\ndeploy-status=TIMEOUT\n");
    }

    #[test]
    fn missing_report_path_is_fatal_even_after_polling() {
        let config = DeployConfig {
            cli_program: "qwak".to_string(),
            ..Default::default()
        };
        let api = ScriptedStatuses::new(&[3]);

        let err = wait_with_options(&config, &api, "dep-1", &fast_opts(5_000)).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::ConfigMissingKey);
    }

    #[test]
    fn dry_run_renders_command_without_executing() {
        let config = DeployConfig {
            cli_program: "qwak".to_string(),
            deploy_type: Some("batch".to_string()),
            model_id: Some("churn-model".to_string()),
            ..Default::default()
        };

        let report = dry_run(&config);

        assert_eq!(
            report.command.as_deref(),
            Some("qwak models deploy batch --model-id churn-model")
        );
        assert_eq!(report.status, "DRY_RUN");
        assert!(!report.reported);
        assert!(report.deployment_id.is_none());
    }

    #[test]
    fn dry_run_keeps_configured_build_id() {
        let config = DeployConfig {
            cli_program: "qwak".to_string(),
            build_id: Some("b-42".to_string()),
            ..Default::default()
        };
        let report = dry_run(&config);
        assert_eq!(report.build_id.as_deref(), Some("b-42"));
    }
}
