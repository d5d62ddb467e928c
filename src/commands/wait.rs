//! `wait` subcommand: follow an already-created deployment.
//!
//! Useful when a retried CI job already triggered the deployment and only
//! the polling and reporting need to happen again.

use clap::Args;

use shipwatch::client::HttpPlatformClient;
use shipwatch::config::DeployConfig;
use shipwatch::pipeline::{self, RunReport};

use super::CmdResult;

#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Deployment id to follow
    pub deployment_id: String,
}

pub fn run(args: &WaitArgs) -> CmdResult<RunReport> {
    let config = DeployConfig::from_env()?;
    let client = HttpPlatformClient::from_config(&config)?;
    let report = pipeline::wait(&config, &client, &args.deployment_id)?;
    Ok((report, 0))
}
