//! Deployment status polling.
//!
//! The one piece of this tool with real temporal structure. Given a
//! deployment id, the poller sleeps, queries, classifies, and repeats until
//! the deployment succeeds, lands in any failure-terminal state, or the
//! wall-clock budget runs out. A timeout is an outcome, not an error: the
//! caller recovers it by reporting the literal status `TIMEOUT`.

use std::time::{Duration, Instant};

use crate::client::PlatformApi;
use crate::error::Result;
use crate::status::DeploymentStatus;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct PollOptions {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollOptions {
    pub fn from_minutes(minutes: u64) -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: Duration::from_secs(minutes * 60),
        }
    }

    fn timeout_minutes(&self) -> u64 {
        self.timeout.as_secs() / 60
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Success {
        status: DeploymentStatus,
        elapsed: Duration,
    },
    Failure {
        status: DeploymentStatus,
    },
    Timeout {
        deployment_id: String,
        timeout_minutes: u64,
    },
}

impl PollOutcome {
    /// The status string reported to the CI environment file.
    pub fn status_label(&self) -> &str {
        match self {
            PollOutcome::Success { status, .. } => status.name(),
            PollOutcome::Failure { status } => status.name(),
            PollOutcome::Timeout { .. } => "TIMEOUT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollReport {
    pub outcome: PollOutcome,
    /// Distinct statuses in the order they were first observed.
    pub transitions: Vec<DeploymentStatus>,
}

/// Poll the deployment until it reaches a terminal state or the window closes.
///
/// Sleeps one interval BEFORE each query; a fresh deployment is never in a
/// terminal state immediately after the CLI returns. Progress is logged only
/// when the observed status name changes. Transport errors are logged and
/// propagated unchanged.
pub fn wait_for_deployment(
    api: &dyn PlatformApi,
    deployment_id: &str,
    opts: &PollOptions,
) -> Result<PollReport> {
    let start = Instant::now();
    let mut current: Option<DeploymentStatus> = None;
    let mut transitions: Vec<DeploymentStatus> = Vec::new();

    while start.elapsed() < opts.timeout {
        std::thread::sleep(opts.interval);

        let response = match api.deployment_status(deployment_id) {
            Ok(response) => response,
            Err(e) => {
                eprintln!(
                    "[poll] error while polling deployment {}: {}",
                    deployment_id, e
                );
                return Err(e);
            }
        };

        let status = DeploymentStatus::from_code(response.status);

        if current != Some(status) {
            eprintln!(
                "[poll] deployment {} status: {} ({}s elapsed)",
                deployment_id,
                status,
                start.elapsed().as_secs()
            );
            current = Some(status);
            transitions.push(status);
        }

        if status.is_successful() {
            let elapsed = start.elapsed();
            let minutes = elapsed.as_secs() / 60;
            let seconds = elapsed.as_secs_f64() - (minutes * 60) as f64;
            eprintln!(
                "[poll] deployment finished after {} minutes and {:.2} seconds with status {}",
                minutes, seconds, status
            );
            return Ok(PollReport {
                outcome: PollOutcome::Success { status, elapsed },
                transitions,
            });
        }

        if !status.is_in_progress() {
            eprintln!(
                "[poll] deployment {} ended with status {}; check the platform dashboard logs",
                deployment_id, status
            );
            return Ok(PollReport {
                outcome: PollOutcome::Failure { status },
                transitions,
            });
        }
    }

    eprintln!(
        "[poll] deployment {} still not terminal after {} minutes",
        deployment_id,
        opts.timeout_minutes()
    );
    Ok(PollReport {
        outcome: PollOutcome::Timeout {
            deployment_id: deployment_id.to_string(),
            timeout_minutes: opts.timeout_minutes(),
        },
        transitions,
    })
}
