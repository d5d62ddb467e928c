//! Deployment status taxonomy.
//!
//! The remote platform reports deployment state as a small integer. The
//! mapping below is a closed lookup table: every code resolves to exactly
//! one name, and anything outside the table falls back to `UnknownStatus`
//! rather than an error.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    InitiatingDeployment,
    PendingDeployment,
    SuccessfulDeployment,
    FailedDeployment,
    SuccessfulUndeployment,
    FailedUndeployment,
    Unset,
    FailedInitiatingDeployment,
    InitiatingUndeployment,
    PendingUndeployment,
    AllBuildsUndeployed,
    CancelledDeployment,
    InitiatingCancelDeployment,
    UnknownStatus,
}

impl DeploymentStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => DeploymentStatus::InitiatingDeployment,
            2 => DeploymentStatus::PendingDeployment,
            3 => DeploymentStatus::SuccessfulDeployment,
            4 => DeploymentStatus::FailedDeployment,
            5 => DeploymentStatus::SuccessfulUndeployment,
            6 => DeploymentStatus::FailedUndeployment,
            7 => DeploymentStatus::Unset,
            8 => DeploymentStatus::FailedInitiatingDeployment,
            9 => DeploymentStatus::InitiatingUndeployment,
            10 => DeploymentStatus::PendingUndeployment,
            11 => DeploymentStatus::AllBuildsUndeployed,
            12 => DeploymentStatus::CancelledDeployment,
            13 => DeploymentStatus::InitiatingCancelDeployment,
            _ => DeploymentStatus::UnknownStatus,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeploymentStatus::InitiatingDeployment => "INITIATING_DEPLOYMENT",
            DeploymentStatus::PendingDeployment => "PENDING_DEPLOYMENT",
            DeploymentStatus::SuccessfulDeployment => "SUCCESSFUL_DEPLOYMENT",
            DeploymentStatus::FailedDeployment => "FAILED_DEPLOYMENT",
            DeploymentStatus::SuccessfulUndeployment => "SUCCESSFUL_UNDEPLOYMENT",
            DeploymentStatus::FailedUndeployment => "FAILED_UNDEPLOYMENT",
            DeploymentStatus::Unset => "UNSET",
            DeploymentStatus::FailedInitiatingDeployment => "FAILED_INITIATING_DEPLOYMENT",
            DeploymentStatus::InitiatingUndeployment => "INITIATING_UNDEPLOYMENT",
            DeploymentStatus::PendingUndeployment => "PENDING_UNDEPLOYMENT",
            DeploymentStatus::AllBuildsUndeployed => "ALL_BUILDS_UNDEPLOYED",
            DeploymentStatus::CancelledDeployment => "CANCELLED_DEPLOYMENT",
            DeploymentStatus::InitiatingCancelDeployment => "INITIATING_CANCEL_DEPLOYMENT",
            DeploymentStatus::UnknownStatus => "UNKNOWN_STATUS",
        }
    }

    /// The deployment is still being rolled out; keep polling.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::InitiatingDeployment | DeploymentStatus::PendingDeployment
        )
    }

    /// The one success-terminal state.
    pub fn is_successful(&self) -> bool {
        *self == DeploymentStatus::SuccessfulDeployment
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_known_codes_map_exactly() {
        let expected = [
            (1, "INITIATING_DEPLOYMENT"),
            (2, "PENDING_DEPLOYMENT"),
            (3, "SUCCESSFUL_DEPLOYMENT"),
            (4, "FAILED_DEPLOYMENT"),
            (5, "SUCCESSFUL_UNDEPLOYMENT"),
            (6, "FAILED_UNDEPLOYMENT"),
            (7, "UNSET"),
            (8, "FAILED_INITIATING_DEPLOYMENT"),
            (9, "INITIATING_UNDEPLOYMENT"),
            (10, "PENDING_UNDEPLOYMENT"),
            (11, "ALL_BUILDS_UNDEPLOYED"),
            (12, "CANCELLED_DEPLOYMENT"),
            (13, "INITIATING_CANCEL_DEPLOYMENT"),
        ];
        for (code, name) in expected {
            assert_eq!(DeploymentStatus::from_code(code).name(), name);
        }
    }

    #[test]
    fn unmapped_codes_fall_back_to_unknown() {
        for code in [0, 14, 99, -1, i64::MAX] {
            assert_eq!(
                DeploymentStatus::from_code(code),
                DeploymentStatus::UnknownStatus
            );
        }
    }

    #[test]
    fn only_initiating_and_pending_are_in_progress() {
        for code in 1..=13 {
            let status = DeploymentStatus::from_code(code);
            assert_eq!(status.is_in_progress(), code == 1 || code == 2);
        }
        assert!(!DeploymentStatus::UnknownStatus.is_in_progress());
    }

    #[test]
    fn only_code_three_is_successful() {
        for code in 1..=13 {
            let status = DeploymentStatus::from_code(code);
            assert_eq!(status.is_successful(), code == 3);
        }
    }

    #[test]
    fn serializes_as_status_name() {
        let json = serde_json::to_string(&DeploymentStatus::SuccessfulDeployment).unwrap();
        assert_eq!(json, "\"SUCCESSFUL_DEPLOYMENT\"");
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(
            DeploymentStatus::PendingDeployment.to_string(),
            "PENDING_DEPLOYMENT"
        );
    }
}
