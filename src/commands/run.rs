//! `run` subcommand: trigger a deployment and follow it to completion.

use clap::Args;

use shipwatch::client::HttpPlatformClient;
use shipwatch::config::DeployConfig;
use shipwatch::pipeline::{self, RunReport};

use super::CmdResult;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Print the deployment command without executing it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &RunArgs) -> CmdResult<RunReport> {
    let config = DeployConfig::from_env()?;

    if args.dry_run {
        return Ok((pipeline::dry_run(&config), 0));
    }

    let client = HttpPlatformClient::from_config(&config)?;
    let report = pipeline::run(&config, &client)?;
    Ok((report, 0))
}
