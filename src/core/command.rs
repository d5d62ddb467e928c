//! Deployment command construction.
//!
//! Builds the argument vector for the platform CLI from a resolved
//! configuration. Pure construction, nothing is executed here.

use crate::config::DeployConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl DeployCommand {
    /// Display form for logs. Arguments are joined verbatim since the
    /// command is executed without a shell.
    pub fn render(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Assemble the `models deploy` invocation from configuration.
///
/// Flag order follows the configuration contract: type positional first,
/// then model/build ids, free-form params, env vars, and the fixed options.
/// The `--timeout` flag rides along only for realtime deployments.
pub fn build(config: &DeployConfig) -> DeployCommand {
    let mut args: Vec<String> = vec!["models".to_string(), "deploy".to_string()];

    if let Some(deploy_type) = &config.deploy_type {
        args.push(deploy_type.clone());
    }

    if let Some(model_id) = &config.model_id {
        args.push("--model-id".to_string());
        args.push(model_id.clone());
    }

    if let Some(build_id) = &config.build_id {
        args.push("--build-id".to_string());
        args.push(build_id.clone());
    }

    for (key, value) in &config.params {
        args.push(format!("--{}", key));
        args.push(value.clone());
    }

    for env_var in &config.env_vars {
        args.push("-E".to_string());
        args.push(env_var.clone());
    }

    if let Some(instance) = &config.instance {
        args.push("--instance".to_string());
        args.push(instance.clone());
    }

    if let Some(replicas) = &config.replicas {
        args.push("--replicas".to_string());
        args.push(replicas.clone());
    }

    if let Some(iam_role_arn) = &config.iam_role_arn {
        args.push("--iam-role-arn".to_string());
        args.push(iam_role_arn.clone());
    }

    if let Some(environment) = &config.environment {
        args.push("--environment".to_string());
        args.push(environment.clone());
    }

    if let Some(timeout) = &config.deploy_timeout {
        if config.deploy_type.as_deref() == Some("realtime") {
            args.push("--timeout".to_string());
            args.push(timeout.clone());
        }
    }

    DeployCommand {
        program: config.cli_program.clone(),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> DeployConfig {
        DeployConfig {
            cli_program: "qwak".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn minimal_config_builds_bare_deploy() {
        let cmd = build(&base_config());
        assert_eq!(cmd.program, "qwak");
        assert_eq!(cmd.args, vec!["models", "deploy"]);
    }

    #[test]
    fn full_config_orders_flags() {
        let config = DeployConfig {
            deploy_type: Some("realtime".to_string()),
            model_id: Some("churn-model".to_string()),
            build_id: Some("b-42".to_string()),
            params: vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
            env_vars: vec!["LOG_LEVEL=debug".to_string()],
            instance: Some("small".to_string()),
            replicas: Some("2".to_string()),
            iam_role_arn: Some("arn:aws:iam::1:role/deploy".to_string()),
            environment: Some("staging".to_string()),
            deploy_timeout: Some("5000".to_string()),
            ..base_config()
        };

        let cmd = build(&config);
        assert_eq!(
            cmd.args,
            vec![
                "models",
                "deploy",
                "realtime",
                "--model-id",
                "churn-model",
                "--build-id",
                "b-42",
                "--a",
                "1",
                "--b",
                "2",
                "-E",
                "LOG_LEVEL=debug",
                "--instance",
                "small",
                "--replicas",
                "2",
                "--iam-role-arn",
                "arn:aws:iam::1:role/deploy",
                "--environment",
                "staging",
                "--timeout",
                "5000",
            ]
        );
    }

    #[test]
    fn params_become_flag_value_pairs_in_order() {
        let config = DeployConfig {
            params: vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
            ..base_config()
        };
        let cmd = build(&config);
        assert_eq!(cmd.args[2..], ["--a", "1", "--b", "2"]);
    }

    #[test]
    fn timeout_only_attached_for_realtime() {
        let mut config = DeployConfig {
            deploy_type: Some("batch".to_string()),
            deploy_timeout: Some("5000".to_string()),
            ..base_config()
        };
        assert!(!build(&config).args.contains(&"--timeout".to_string()));

        config.deploy_type = Some("realtime".to_string());
        assert!(build(&config).args.contains(&"--timeout".to_string()));
    }

    #[test]
    fn timeout_dropped_without_deploy_type() {
        let config = DeployConfig {
            deploy_timeout: Some("5000".to_string()),
            ..base_config()
        };
        assert!(!build(&config).args.contains(&"--timeout".to_string()));
    }

    #[test]
    fn render_joins_program_and_args() {
        let config = DeployConfig {
            deploy_type: Some("batch".to_string()),
            model_id: Some("m".to_string()),
            ..base_config()
        };
        assert_eq!(
            build(&config).render(),
            "qwak models deploy batch --model-id m"
        );
    }
}
