//! Configuration documents and notifications for tests

/// Account id used throughout the fixtures
pub const TEST_ACCOUNT_ID: &str = "123456789012";

/// A configuration document enabling every handler
pub const FULL_CONFIG: &str = "\
account_password_policy:
  update_account_password_policy: true
  password_policy:
    MinimumPasswordLength: 14
    RequireSymbols: true
    RequireNumbers: true
    RequireUppercaseCharacters: true
    RequireLowercaseCharacters: true
    AllowUsersToChangePassword: true
    MaxPasswordAge: 90
    PasswordReusePrevention: 24
    HardExpiry: false
default_vpc:
  delete_default_vpc: true
  preserve_vpc_regions:
    - eu-west-1
enable_ebs_block_public_access: true
require_imdsv2:
  HttpTokens: required
  HttpPutResponseHopLimit: 2
  HttpEndpoint: enabled
  InstanceMetadataTags: disabled
enable_account_s3_block_public_access:
  BlockPublicAcls: true
  IgnorePublicAcls: true
  BlockPublicPolicy: true
  RestrictPublicBuckets: true
";

/// An organizations `CreateAccountResult` notification
pub fn create_account_notification(state: &str, account_id: &str) -> String {
    serde_json::json!({
        "version": "0",
        "detail-type": "AWS Service Event via CloudTrail",
        "source": "aws.organizations",
        "detail": {
            "eventSource": "organizations.amazonaws.com",
            "eventName": "CreateAccountResult",
            "serviceEventDetails": {
                "createAccountStatus": {
                    "state": state,
                    "accountId": account_id,
                    "accountName": "sandbox"
                }
            }
        }
    })
    .to_string()
}

/// A baseline event as the configuration loader would emit it
pub fn baseline_event(global_config: serde_json::Value, messages: &[&str]) -> String {
    serde_json::json!({
        "global_config": global_config,
        "new_aws_account_id": TEST_ACCOUNT_ID,
        "cross_account_role_arn": format!(
            "arn:aws:iam::{TEST_ACCOUNT_ID}:role/OrganizationAccountAccessRole"
        ),
        "messages": messages,
    })
    .to_string()
}
