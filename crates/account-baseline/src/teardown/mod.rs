//! Default VPC teardown
//!
//! A VPC can only be deleted after everything attached to it is gone.
//! [`teardown_vpc`] removes the dependents category by category in
//! [`TEARDOWN_ORDER`], then deletes the VPC. [`process_region`] applies that
//! to every default VPC in a region and [`sweep_account`] to every region of
//! an account.

pub mod deleters;
mod region;
mod sweep;

pub use region::{RegionReport, process_region};
pub use sweep::{SweepReport, sweep_account};

use crate::aws::ec2::NetworkOperations;
use crate::aws::error::{classify_anyhow_error, ignore_not_found};
use account_baseline_common::TEARDOWN_ORDER;
use anyhow::Result;
use serde::Serialize;
use tracing::{error, info, warn};

/// What happened to one VPC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeardownOutcome {
    Deleted,
    /// The VPC no longer existed; nothing was touched
    AlreadyGone,
    /// Network interfaces remain; nothing was touched
    SkippedHasEnis,
    /// The provider reported a remaining dependency; the VPC still exists
    FailedDependency,
}

/// Tear down `vpc_id` and delete it.
///
/// A VPC that no longer exists or that has any network interface is left
/// alone. A dependency violation
/// anywhere in the sequence is reported as [`TeardownOutcome::FailedDependency`];
/// any other error is returned.
pub async fn teardown_vpc<N: NetworkOperations>(
    net: &N,
    vpc_id: &str,
    region: &str,
) -> Result<TeardownOutcome> {
    if !net.vpc_exists(vpc_id).await? {
        info!(vpc_id = %vpc_id, region = %region, "VPC already deleted");
        return Ok(TeardownOutcome::AlreadyGone);
    }

    let interfaces = net.network_interface_ids(vpc_id).await?;
    if !interfaces.is_empty() {
        warn!(
            vpc_id = %vpc_id,
            region = %region,
            count = interfaces.len(),
            "VPC has network interfaces, not deleting"
        );
        return Ok(TeardownOutcome::SkippedHasEnis);
    }

    match remove_all_then_delete(net, vpc_id).await {
        Ok(()) => {
            info!(vpc_id = %vpc_id, region = %region, "Deleted default VPC");
            Ok(TeardownOutcome::Deleted)
        }
        Err(e) if classify_anyhow_error(&e).is_dependency_violation() => {
            error!(
                vpc_id = %vpc_id,
                region = %region,
                error = %format!("{e:#}"),
                "VPC still has dependencies, leaving it in place"
            );
            Ok(TeardownOutcome::FailedDependency)
        }
        Err(e) => Err(e),
    }
}

async fn remove_all_then_delete<N: NetworkOperations>(net: &N, vpc_id: &str) -> Result<()> {
    for category in TEARDOWN_ORDER {
        deleters::remove(category, net, vpc_id).await?;
    }
    ignore_not_found(net.delete_vpc(vpc_id).await)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::ec2::MockNetworkOperations;
    use crate::aws::error::AwsError;
    use crate::testing::{FakeNetwork, FakeVpc};

    fn dependency_violation() -> anyhow::Error {
        AwsError::DependencyViolation {
            message: "The vpc has dependencies and cannot be deleted.".into(),
        }
        .into()
    }

    #[tokio::test]
    async fn test_vpc_with_interfaces_is_untouched() {
        let net = FakeNetwork::new();
        net.add_vpc(FakeVpc::populated("vpc-1").with_interface("eni-1"));

        let outcome = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();

        assert_eq!(outcome, TeardownOutcome::SkippedHasEnis);
        assert!(net.mutating_calls().is_empty());
        assert!(net.has_vpc("vpc-1"));
    }

    #[tokio::test]
    async fn test_interfaces_checked_before_anything_else() {
        let mut net = MockNetworkOperations::new();
        net.expect_vpc_exists().returning(|_| Ok(true));
        net.expect_network_interface_ids()
            .times(1)
            .returning(|_| Ok(vec!["eni-1".to_string()]));
        net.expect_internet_gateways().never();
        net.expect_delete_vpc().never();

        let outcome = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();
        assert_eq!(outcome, TeardownOutcome::SkippedHasEnis);
    }

    #[tokio::test]
    async fn test_categories_removed_in_dependency_order() {
        let net = FakeNetwork::new();
        net.add_vpc(FakeVpc::populated("vpc-1"));

        let outcome = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();
        assert_eq!(outcome, TeardownOutcome::Deleted);

        let calls = net.mutating_calls();
        let expected = [
            "detach_internet_gateway",
            "delete_internet_gateway",
            "delete_egress_only_internet_gateway",
            "delete_subnet",
            "delete_route_table",
            "delete_network_acl",
            "delete_peering_connection",
            "delete_vpc_endpoint",
            "delete_security_group",
            "detach_vpn_gateway",
            "delete_vpn_connection",
            "delete_vpn_gateway",
            "delete_vpc",
        ];
        let ops: Vec<&str> = calls.iter().map(|c| c.op.as_str()).collect();
        assert_eq!(ops, expected);
        assert!(!net.has_vpc("vpc-1"));
    }

    #[tokio::test]
    async fn test_protected_instances_are_kept() {
        let net = FakeNetwork::new();
        net.add_vpc(FakeVpc::populated("vpc-1"));

        teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();

        let targets: Vec<String> = net
            .mutating_calls()
            .into_iter()
            .map(|c| c.target)
            .collect();
        for protected in [
            "rtb-main",
            "acl-default",
            "sg-default",
            "pcx-deleted",
            "igw-detached",
            "eigw-detached",
            "vpn-deleted",
        ] {
            assert!(
                !targets.iter().any(|t| t == protected),
                "{protected} was touched"
            );
        }
    }

    #[tokio::test]
    async fn test_second_run_deletes_nothing() {
        let net = FakeNetwork::new();
        net.add_vpc(FakeVpc::populated("vpc-1"));

        let first = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();
        assert_eq!(first, TeardownOutcome::Deleted);
        net.clear_calls();

        let second = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();
        assert_eq!(second, TeardownOutcome::AlreadyGone);
        assert!(net.mutating_calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_vpc_is_not_listed_or_deleted() {
        let mut net = MockNetworkOperations::new();
        net.expect_vpc_exists()
            .withf(|vpc| vpc == "vpc-gone")
            .times(1)
            .returning(|_| Ok(false));
        net.expect_network_interface_ids().never();
        net.expect_delete_vpc().never();

        let outcome = teardown_vpc(&net, "vpc-gone", "us-east-1").await.unwrap();
        assert_eq!(outcome, TeardownOutcome::AlreadyGone);
    }

    #[tokio::test]
    async fn test_dependency_violation_on_vpc_delete() {
        let net = FakeNetwork::new();
        net.add_vpc(FakeVpc::empty("vpc-1"));
        net.fail_delete_vpc("vpc-1");

        let outcome = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();
        assert_eq!(outcome, TeardownOutcome::FailedDependency);
        assert!(net.has_vpc("vpc-1"));
    }

    #[tokio::test]
    async fn test_dependency_violation_inside_a_deleter() {
        let mut net = MockNetworkOperations::new();
        net.expect_vpc_exists().returning(|_| Ok(true));
        net.expect_network_interface_ids().returning(|_| Ok(vec![]));
        net.expect_internet_gateways().returning(|_| Ok(vec![]));
        net.expect_egress_only_internet_gateways()
            .returning(|_| Ok(vec![]));
        net.expect_subnet_ids()
            .returning(|_| Ok(vec!["subnet-1".to_string()]));
        net.expect_delete_subnet()
            .returning(|_| Err(dependency_violation()));
        net.expect_route_tables().never();
        net.expect_delete_vpc().never();

        let outcome = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap();
        assert_eq!(outcome, TeardownOutcome::FailedDependency);
    }

    #[tokio::test]
    async fn test_other_errors_propagate() {
        let mut net = MockNetworkOperations::new();
        net.expect_vpc_exists().returning(|_| Ok(true));
        net.expect_network_interface_ids().returning(|_| {
            Err(AwsError::AccessDenied {
                code: "UnauthorizedOperation".into(),
                message: "not allowed".into(),
            }
            .into())
        });

        let err = teardown_vpc(&net, "vpc-1", "us-east-1").await.unwrap_err();
        assert!(matches!(
            classify_anyhow_error(&err),
            AwsError::AccessDenied { .. }
        ));
    }
}
